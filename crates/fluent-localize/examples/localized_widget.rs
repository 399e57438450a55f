//! Minimal end-to-end demo of the localization cache and lookup.
//!
//! Run with `cargo run --example localized_widget`.

use std::sync::Arc;

use fluent_localize::{l10n_args, FsFetcher, L10nRegistry, Localizer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let locales_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/locales");
    let registry = Arc::new(L10nRegistry::new(Arc::new(FsFetcher::new(locales_dir))));

    // One localizer per component type; instances share its bundles.
    let widget = Localizer::new(Arc::clone(&registry));
    widget.set_global_locale("en-US".parse()?);

    widget.load_resource_for_locale("en-US/main.ftl", None).await?;
    widget
        .load_resource_for_locale("it/main.ftl", Some(&"it".parse()?))
        .await?;

    let args = l10n_args!["name" => "Ada"];
    println!(
        "global locale: {}",
        widget
            .localize("welcome", args.as_ref(), None)?
            .unwrap_or_default()
    );

    // An instance can pin its own locale once resources are loaded for it.
    let mut italian = widget.instance();
    italian.set_locale("it".parse()?)?;
    let args = l10n_args!["name" => "Ada"];
    println!(
        "instance locale: {}",
        italian
            .localize("welcome", args.as_ref(), None)?
            .unwrap_or_default()
    );

    Ok(())
}
