use std::path::PathBuf;

use devops_inventory::{ParseOptions, ValidationError};

pub(crate) fn run(paths: Vec<PathBuf>, format: super::Format, options: ParseOptions) {
    let mut results: Vec<(PathBuf, Vec<ValidationError>)> = Vec::new();
    for path in &paths {
        let (_, errors) = super::load("validate", path, options);
        results.push((path.clone(), errors));
    }

    let has_errors = results.iter().any(|(_, e)| !e.is_empty());

    match format {
        super::Format::Text => {
            let multi = results.len() > 1;
            for (path, errors) in &results {
                if multi && !errors.is_empty() {
                    eprintln!("{}:", path.display());
                }
                for e in errors {
                    if multi {
                        eprintln!("  {e}");
                    } else {
                        eprintln!("{e}");
                    }
                }
            }
            if multi {
                let total = results.len();
                let failed = results.iter().filter(|(_, e)| !e.is_empty()).count();
                eprintln!("\n{total} inventories: {} ok, {failed} with errors", total - failed);
            } else if !has_errors {
                eprintln!("ok");
            }
        }
        super::Format::Json => {
            let entries: Vec<serde_json::Value> = results
                .iter()
                .map(|(path, errors)| {
                    serde_json::json!({
                        "path": path.display().to_string(),
                        "diagnostics": errors,
                    })
                })
                .collect();
            match serde_json::to_string_pretty(&entries) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("devops-inventory validate: {e}");
                    std::process::exit(1);
                }
            }
        }
    }

    if has_errors {
        std::process::exit(1);
    }
}
