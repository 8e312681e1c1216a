use anyhow::Result;
use clap::ValueEnum;
use vitalis_core::session::Theme;

use crate::app::App;
use crate::render;

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

pub fn run(app: &App, choice: Option<ThemeChoice>) -> Result<()> {
    let theme = match choice {
        None => {
            println!("Current theme: {}", app.session.theme()?);
            return Ok(());
        }
        Some(ThemeChoice::Toggle) => app.session.toggle_theme()?,
        Some(ThemeChoice::Light) => set(app, Theme::Light)?,
        Some(ThemeChoice::Dark) => set(app, Theme::Dark)?,
    };
    render::success(&format!("Theme set to {theme}."));
    Ok(())
}

fn set(app: &App, theme: Theme) -> Result<Theme> {
    app.session.set_theme(theme)?;
    Ok(theme)
}
