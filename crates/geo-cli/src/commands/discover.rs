use anyhow::{Context, bail};
use geo_client::{ErrorKind, GeoClient};
use geo_core::normalize::{normalize_brands, select_brand, BrandSummary, ChoiceReason};

use crate::cli::GlobalFlags;
use crate::output::output;
use crate::progress::Progress;
use crate::render;

async fn fetch_brands(client: &GeoClient) -> anyhow::Result<Vec<BrandSummary>> {
    let raw = client.fetch_brands().await.map_err(|error| {
        let hint = if error.kind() == ErrorKind::Auth {
            ". Check your API key at https://app.rankscale.ai/settings"
        } else {
            ""
        };
        anyhow::anyhow!("brand discovery failed: {error}{hint}")
    })?;
    Ok(normalize_brands(Some(&raw))
        .iter()
        .map(BrandSummary::from_value)
        .collect())
}

/// Handle `geoscope --discover-brands`.
pub async fn handle(client: &GeoClient, flags: &GlobalFlags) -> anyhow::Result<()> {
    let progress = Progress::spinner("Fetching brands from Rankscale...");
    let brands = match fetch_brands(client).await {
        Ok(brands) => brands,
        Err(error) => {
            progress.finish_err("brand lookup failed");
            return Err(error);
        }
    };
    progress.finish_clear();

    output(&brands, || render::brands(&brands), flags.format)
}

/// Resolve a brand ID from the account's brand list when none is configured.
pub async fn discover_brand_id(
    client: &GeoClient,
    name_hint: Option<&str>,
) -> anyhow::Result<String> {
    let brands = fetch_brands(client).await?;
    if brands.is_empty() {
        bail!(
            "No brands found on this account. Please set up a brand at https://app.rankscale.ai"
        );
    }

    let choice = select_brand(&brands, name_hint)
        .context("the selected brand has no ID; pass --brand-id explicitly")?;

    match choice.reason {
        ChoiceReason::OnlyBrand => {
            tracing::info!(brand_id = %choice.id, "using the only brand on this account");
        }
        ChoiceReason::NameMatch => {
            tracing::info!(brand_id = %choice.id, "brand matched by name");
        }
        ChoiceReason::FirstOfMany => {
            let available = brands
                .iter()
                .map(|brand| {
                    format!(
                        "{} ({})",
                        brand.name.as_deref().unwrap_or("(unnamed)"),
                        brand.id.as_deref().unwrap_or("?")
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                brand_id = %choice.id,
                %available,
                "multiple brands found; using the first. Set RANKSCALE_BRAND_ID to choose"
            );
        }
    }

    Ok(choice.id)
}
