extern crate arcls;

use arcls::error::Error;
use arcnav::HierarchyConfig;

fn main() -> Result<(), Error> {
    let matches = arcls::cli::parse_flags();

    arcls::utils::initialize_logging_from_args(&matches);

    let listing_path = matches
        .value_of("listing")
        .ok_or_else(|| Error::CliInputError("Listing is required.".to_string()))?;
    let config = match matches.value_of("config") {
        Some(path) => HierarchyConfig::from_file(path)?,
        None => HierarchyConfig::default(),
    };
    let entries = arcls::utils::load_listing(listing_path)?;
    tracing::debug!(entries = entries.len(), listing = listing_path, "loaded listing");

    match matches.subcommand() {
        ("roots", Some(_)) => arcls::tree::show_roots(&entries, config)?,
        ("ls", Some(cmd)) => {
            let dir = cmd.value_of("DIR").unwrap();
            arcls::tree::show_directory(&entries, config, dir)?
        }
        ("find", Some(cmd)) => {
            let path = cmd.value_of("PATH").unwrap();
            arcls::tree::show_path(&entries, config, path)?
        }
        ("tree", Some(cmd)) => arcls::tree::show_tree(&entries, config, cmd.is_present("json"))?,
        ("stats", Some(_)) => arcls::tree::show_stats(&entries, config)?,
        _ => {
            println!("No command specified or unknown command. Use --help for available commands.");
        }
    }
    Ok(())
}
