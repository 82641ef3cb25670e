use clap::ValueEnum;

use crate::cli::{ConfigCommands, OutputFormat};
use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};

pub fn dispatch(cmd: &ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(),
        ConfigCommands::SetFile { path } => set_file(path),
        ConfigCommands::SetFormat { format } => set_format(*format),
    }
}

fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings:   {}", settings_path().display());
    println!("Data file:  {}", settings.data_file);
    println!("Format:     {}", settings.default_format);
    Ok(())
}

fn set_file(path: &str) -> Result<()> {
    let mut settings = load_settings();
    settings.data_file = shellexpand_path(path);
    save_settings(&settings)?;
    println!("Data file set to {}", settings.data_file);
    Ok(())
}

fn set_format(format: OutputFormat) -> Result<()> {
    let mut settings = load_settings();
    settings.default_format = format
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_else(|| "text".to_string());
    save_settings(&settings)?;
    println!("Default format set to {}", settings.default_format);
    Ok(())
}
