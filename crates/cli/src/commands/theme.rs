//! `aaayafuj theme` — Show or change the console theme.

use aaayafuj_core::store::ThemeStore;
use aaayafuj_store::FileThemeStore;

pub async fn run(
    bg: Option<String>,
    accent: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, data_dir) = super::load_config()?;
    let store = FileThemeStore::in_dir(&data_dir);

    let mut theme = store.load().await?;

    if bg.is_none() && accent.is_none() {
        println!("  bg:     {}", theme.bg_color);
        println!("  accent: {}", theme.accent_color);
        return Ok(());
    }

    if let Some(bg) = bg {
        theme.bg_color = bg;
    }
    if let Some(accent) = accent {
        theme.accent_color = accent;
    }

    if !theme.is_valid() {
        return Err("Colors must be #rrggbb hex values".into());
    }

    store.save(&theme).await?;
    println!("  theme updated: bg {} / accent {}", theme.bg_color, theme.accent_color);
    Ok(())
}
