use crate::{
    render::DEFAULT_TEMPLATE,
    settings::{Settings, SETTINGS_FILE},
    utils, InitArgs,
};
use anyhow::{anyhow, Context};
use colored::Colorize;
use log::{debug, info};
use std::fs;

/// Write a settings file and the built-in template to get started.
pub fn init(args: &InitArgs) -> Result<(), anyhow::Error> {
    debug!("{args:?}");

    let settings_path = args.dir.join(SETTINGS_FILE);
    let template_path = args.dir.join(&args.template_file);

    if !args.force {
        for path in [&settings_path, &template_path] {
            if path.exists() {
                return Err(anyhow!(
                    "File already exists at {}; use `--force` to overwrite",
                    path.display()
                ));
            }
        }
    }

    if !args.dir.exists() {
        debug!("Create directory at {}", args.dir.display());
        fs::create_dir_all(&args.dir)
            .context(format!("Can't create directory at {}", args.dir.display()))?;
    }

    let overwrite_settings = settings_path.exists();
    let mut settings = Settings::example();
    settings.fetch.template = Some(args.template_file.clone());
    settings.write(&settings_path)?;
    log_written(&settings_path.display().to_string(), overwrite_settings);

    let overwrite_template = template_path.exists();
    utils::write_file(&template_path, DEFAULT_TEMPLATE.as_bytes())?;
    log_written(&template_path.display().to_string(), overwrite_template);

    println!();
    println!("Next steps:");
    println!(
        "  1. Set {} and {} in {}, or export {} and {}",
        "url".bold(),
        "token".bold(),
        settings_path.display(),
        "LINKDOWN_URL".bold(),
        "LINKDOWN_TOKEN".bold()
    );
    println!(
        "  2. Adjust the template at {}",
        template_path.display().to_string().blue()
    );
    println!(
        "  3. Run {}",
        "linkdown fetch --output bookmarks.md".green()
    );

    Ok(())
}

fn log_written(path: &str, overwritten: bool) {
    if overwritten {
        info!("Overwrote {path}");
    } else {
        info!("Created {path}");
    }
}
