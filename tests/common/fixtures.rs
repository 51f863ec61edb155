//! Static catalogs used across harnesses.

use catsearch::CatalogRecord;

use super::builders::RecordBuilder;

/// A small storefront catalog covering every searchable field.
pub fn store_catalog() -> Vec<CatalogRecord> {
    vec![
        RecordBuilder::new("Call of Duty: Modern Warfare III")
            .platform("Steam")
            .category("Shooter")
            .build(),
        RecordBuilder::new("FIFA 24 Ultimate Team Points 4600")
            .platform("Origin")
            .category("In-game currency")
            .build(),
        RecordBuilder::new("Fortnite V-Bucks 1000")
            .platform("Epic Games")
            .category("In-game currency")
            .build(),
        RecordBuilder::new("Fortnite V-Bucks 2800")
            .platform("Epic Games")
            .category("In-game currency")
            .build(),
        RecordBuilder::new("Steam Wallet Code €20")
            .platform("Steam")
            .category("Gift card")
            .build(),
        RecordBuilder::new("Steam Wallet Code")
            .platform("Steam")
            .category("Gift card")
            .build(),
        RecordBuilder::new("PlayStation Plus Essential 12 Months")
            .platform("PSN")
            .category("Subscription")
            .build(),
        RecordBuilder::new("Xbox Game Pass Ultimate 3 Months")
            .platform("Xbox")
            .category("Subscription")
            .build(),
        RecordBuilder::new("Xbox Gift Card 50")
            .platform("Xbox")
            .category("Gift card")
            .build(),
        RecordBuilder::new("Roblox 800 Robux")
            .description("Top up your Roblox account")
            .platform("Roblox")
            .tag("robux")
            .build(),
        RecordBuilder::new("Minecraft Java & Bedrock Edition")
            .platform("PC")
            .category("Sandbox")
            .build(),
        RecordBuilder::new("Grand Theft Auto V: Premium Edition")
            .platform("Rockstar")
            .category("Action")
            .tag("GTA")
            .build(),
    ]
}

/// `n` synthetic gift-card style records for volume tests.
pub fn generated_catalog(n: usize) -> Vec<CatalogRecord> {
    const PLATFORMS: &[&str] = &["Steam", "PSN", "Xbox", "Nintendo", "Origin"];
    const TITLES: &[&str] = &[
        "Wallet Code",
        "Gift Card",
        "V-Bucks",
        "Ultimate Team Points",
        "Robux",
        "Shark Card",
    ];
    (0..n)
        .map(|i| {
            let platform = PLATFORMS[i % PLATFORMS.len()];
            let title = TITLES[(i / PLATFORMS.len()) % TITLES.len()];
            RecordBuilder::new(format!("{platform} {title} {}", 10 + i % 90))
                .platform(platform)
                .build()
        })
        .collect()
}
