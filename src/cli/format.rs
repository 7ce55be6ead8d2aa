use std::path::PathBuf;

use devops_inventory::FormatResult;

pub(crate) fn run(path: PathBuf, check: bool, allow_lossy: bool) {
    let result = match devops_inventory::format_inventory(&path) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("devops-inventory format: {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    let file = &result.path;
    if !result.changed {
        eprintln!("ok");
        return;
    }

    if check {
        eprintln!("Would reformat: {}", file.display());
        report_losses(&result);
        eprint!(
            "{}",
            devops_inventory::diff_inventory(&result, &file.display().to_string())
        );
        std::process::exit(1);
    }

    if result.is_lossy() && !allow_lossy {
        eprintln!(
            "devops-inventory format: refusing to rewrite {}: formatting would lose information",
            file.display()
        );
        report_losses(&result);
        eprintln!("Fix the issues above or rerun with --allow-lossy.");
        std::process::exit(1);
    }

    if let Err(e) = std::fs::write(file, &result.content) {
        eprintln!(
            "devops-inventory format: failed to write {}: {e}",
            file.display()
        );
        std::process::exit(1);
    }
    if result.is_lossy() {
        report_losses(&result);
    }
    eprintln!("Formatted {}", file.display());
}

/// Print the unrecognized keys and invalid records a rewrite would not preserve.
fn report_losses(result: &FormatResult) {
    for key in &result.dropped_keys {
        eprintln!("  dropped: {key}");
    }
    for e in &result.errors {
        eprintln!("  {e}");
    }
}
