//! Store action implementations.

use clap::ArgMatches;

use crate::actions::utils::{flag, print_formatted, required};
use crate::actions::CliActionError;
use crate::client::Dashactyl;
use crate::commands::params::{PARAMETER_ID, PARAMETER_REFRESH};
use crate::format::CsvRecordProducer;
use crate::model::StoreItem;

impl CsvRecordProducer for StoreItem {
    fn csv_header() -> Vec<String> {
        ["ID", "NAME", "DESCRIPTION", "IMAGE", "PRICE", "PER_ITEM", "ENABLED"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            self.image.clone().unwrap_or_default(),
            self.price.clone(),
            self.per_item.clone(),
            self.enabled.to_string(),
        ]]
    }
}

pub async fn list_items(client: &Dashactyl, matches: &ArgMatches) -> Result<(), CliActionError> {
    let items = client.store().fetch_all().await?;
    print_formatted(&items, matches)
}

pub async fn get_item(client: &Dashactyl, matches: &ArgMatches) -> Result<(), CliActionError> {
    let id = *required::<u64>(matches, PARAMETER_ID)?;
    let item = client.store().fetch(id, flag(matches, PARAMETER_REFRESH)).await?;
    print_formatted(&item, matches)
}
