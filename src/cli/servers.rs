use std::path::PathBuf;

use devops_inventory::{find_servers, ParseOptions, ServerFilter};

pub(crate) fn run(path: PathBuf, filter: ServerFilter, format: super::Format) {
    let (inventory, _) = super::load("servers", &path, ParseOptions::default());
    let servers = find_servers(&inventory, &filter);

    match format {
        super::Format::Text => {
            if servers.is_empty() {
                eprintln!("No matching servers.");
                return;
            }
            for server in &servers {
                println!(
                    "{}\t{}\t{}",
                    server.id,
                    server.name.as_deref().unwrap_or("-"),
                    server.host.as_deref().unwrap_or("-"),
                );
            }
        }
        super::Format::Json => match serde_json::to_string_pretty(&servers) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("devops-inventory servers: {e}");
                std::process::exit(1);
            }
        },
    }
}
