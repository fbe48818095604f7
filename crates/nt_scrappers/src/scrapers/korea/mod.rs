use crate::scrapers::Region;

pub mod nate;

pub use nate::NateScraper;

pub const REGION: Region = Region {
    name: "korea",
    emoji: "🇰🇷",
};
