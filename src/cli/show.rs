use std::path::PathBuf;

use devops_inventory::ParseOptions;

pub(crate) fn run(path: PathBuf, options: ParseOptions) {
    let (inventory, errors) = super::load("show", &path, options);
    for e in &errors {
        eprintln!("warning: {e}");
    }
    match serde_json::to_string_pretty(&inventory) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("devops-inventory show: {e}");
            std::process::exit(1);
        }
    }
}
