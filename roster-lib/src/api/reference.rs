//! Reference-data lookups (professions, qualities)

use reqwest::Method;

use crate::RosterClient;
use crate::error::Error;
use crate::model::OptionRef;

impl RosterClient {
    /// Retrieves the ordered profession list.
    pub async fn professions(&self) -> Result<Vec<OptionRef>, Error> {
        self.fetch::<Vec<OptionRef>, ()>(Method::GET, "profession", None)
            .await
    }

    /// Retrieves the ordered quality list.
    pub async fn qualities(&self) -> Result<Vec<OptionRef>, Error> {
        self.fetch::<Vec<OptionRef>, ()>(Method::GET, "quality", None)
            .await
    }
}
