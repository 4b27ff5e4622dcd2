use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Récolte
///
/// Every section has built-in defaults matching the original scraper, so a
/// config file only needs to override what it cares about. With no file at
/// all, `Config::default()` carries the full Amazon.fr category table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    #[serde(rename = "category")]
    pub categories: Vec<CategorySpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            output: OutputConfig::default(),
            categories: default_categories(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of pages fetched concurrently per round
    #[serde(rename = "window-width")]
    pub window_width: u32,

    /// Total attempts for a single page fetch (first try included)
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts for the same page (seconds)
    #[serde(rename = "retry-delay-secs")]
    pub retry_delay_secs: u64,

    /// Pause between pagination rounds within a category (seconds)
    #[serde(rename = "round-pause-secs")]
    pub round_pause_secs: u64,

    /// HTTP request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            window_width: 10,
            max_attempts: 3,
            retry_delay_secs: 5,
            round_pause_secs: 2,
            request_timeout_secs: 30,
        }
    }
}

impl CrawlerConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    pub fn round_pause(&self) -> Duration {
        Duration::from_secs(self.round_pause_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CSV files are written into (created if absent)
    pub directory: String,

    /// Filename prefix for per-category and aggregate files
    #[serde(rename = "file-prefix")]
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "data".to_string(),
            file_prefix: "amazon".to_string(),
        }
    }
}

/// One product category: display name, base search URL, and informational
/// subcategory labels
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub subcategories: Vec<String>,
}

impl CategorySpec {
    fn new(name: &str, url: &str, subcategories: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The built-in Amazon.fr category table
pub fn default_categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new(
            "Informatique",
            "https://www.amazon.fr/s?i=computers&rh=n%3A340858031&fs=true",
            &["ordinateurs", "composants", "périphériques", "stockage", "logiciels"],
        ),
        CategorySpec::new(
            "High-Tech",
            "https://www.amazon.fr/s?i=electronics&rh=n%3A13921051&fs=true",
            &["smartphones", "tablettes", "accessoires", "gadgets"],
        ),
        CategorySpec::new(
            "Téléphones",
            "https://www.amazon.fr/s?i=mobile&rh=n%3A218193031&fs=true",
            &["téléphones", "accessoires", "étuis", "chargeurs"],
        ),
        CategorySpec::new(
            "TV & Vidéo",
            "https://www.amazon.fr/s?i=tv&rh=n%3A1055398&fs=true",
            &["téléviseurs", "projecteurs", "accessoires", "home cinéma"],
        ),
        CategorySpec::new(
            "Audio & HiFi",
            "https://www.amazon.fr/s?i=hifi&rh=n%3A677338011&fs=true",
            &["enceintes", "casques", "amplificateurs", "systèmes audio"],
        ),
        CategorySpec::new(
            "Livres",
            "https://www.amazon.fr/s?i=stripbooks&rh=n%3A301061&fs=true",
            &["romans", "bd", "manuels", "jeunesse"],
        ),
        CategorySpec::new(
            "Jeux vidéo",
            "https://www.amazon.fr/s?i=videogames&rh=n%3A409488&fs=true",
            &["consoles", "jeux", "accessoires", "manettes"],
        ),
        CategorySpec::new(
            "Jouets",
            "https://www.amazon.fr/s?i=toys&rh=n%3A548012&fs=true",
            &["jeux", "poupées", "figurines", "jeux de société"],
        ),
        CategorySpec::new(
            "Mode",
            "https://www.amazon.fr/s?i=fashion&rh=n%3A197858031&fs=true",
            &["vêtements", "chaussures", "accessoires", "bijoux"],
        ),
        CategorySpec::new(
            "Maison",
            "https://www.amazon.fr/s?i=garden&rh=n%3A197266031&fs=true",
            &["décoration", "mobilier", "cuisine", "jardin"],
        ),
        CategorySpec::new(
            "Beauté",
            "https://www.amazon.fr/s?i=beauty&rh=n%3A197858031&fs=true",
            &["parfums", "maquillage", "soins", "accessoires"],
        ),
        CategorySpec::new(
            "Sports",
            "https://www.amazon.fr/s?i=sports&rh=n%3A197858031&fs=true",
            &["fitness", "vélos", "randonnée", "tennis"],
        ),
        CategorySpec::new(
            "Auto",
            "https://www.amazon.fr/s?i=automotive&rh=n%3A197858031&fs=true",
            &["pièces", "accessoires", "entretien", "gps"],
        ),
        CategorySpec::new(
            "Bébé",
            "https://www.amazon.fr/s?i=baby&rh=n%3A197858031&fs=true",
            &["vêtements", "jouets", "puériculture", "alimentation"],
        ),
        CategorySpec::new(
            "Animalerie",
            "https://www.amazon.fr/s?i=pets&rh=n%3A197858031&fs=true",
            &["alimentation", "accessoires", "soins", "jouets"],
        ),
    ]
}
