use clap::Subcommand;
use storefront_client::{AddressDirectory, EsgooDirectory};
use storefront_core::Region;

/// Sub-commands available under `address`.
#[derive(Debug, Subcommand)]
pub enum AddressCommands {
    /// List provinces and cities
    Provinces,
    /// List districts of a province
    Districts { province_id: String },
    /// List wards of a district
    Wards { district_id: String },
}

pub(crate) async fn run_address(
    command: AddressCommands,
    directory: &EsgooDirectory,
) -> anyhow::Result<()> {
    let regions = match command {
        AddressCommands::Provinces => directory.provinces().await?,
        AddressCommands::Districts { province_id } => directory.districts(&province_id).await?,
        AddressCommands::Wards { district_id } => directory.wards(&district_id).await?,
    };
    print_regions(&regions);
    Ok(())
}

fn print_regions(regions: &[Region]) {
    for region in regions {
        println!("{:<8} {}", region.id, region.full_name);
    }
}
