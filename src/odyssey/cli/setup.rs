use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "odyssey", bin_name = "odyssey", version)]
#[command(about = "Card catalog and card server for Conqueror's Odyssey", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Debug logging
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Plain output without colors
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty card store
    #[command(display_order = 1)]
    Init,

    /// Show the card catalog
    #[command(alias = "ls", display_order = 2)]
    List,

    /// Show one card in detail
    #[command(alias = "v", display_order = 3)]
    View {
        /// Card id
        id: u64,

        /// Open on the stats slide
        #[arg(long)]
        stats: bool,

        /// Show the image overlay
        #[arg(long)]
        fullscreen: bool,
    },

    /// Submit a new card to the card server
    #[command(display_order = 4)]
    Add(AddArgs),

    /// Run the card server
    #[command(display_order = 5)]
    Serve {
        /// Address to listen on (defaults to the configured bind)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Check the card store for inconsistencies
    #[command(display_order = 6)]
    Doctor,

    /// Get or set configuration
    #[command(display_order = 7)]
    Config {
        /// Configuration key (data-file, bind, server-url, corrupt-store)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// Submission form fields. Values are passed to the form as entered and
/// validated there; anything left out keeps the form default.
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// common, rare, epic, legendary, mythical or hero
    #[arg(long)]
    pub rarity: Option<String>,

    /// Image URL
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub lore: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub hp: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub attack: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub defense: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub mana: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub speed: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub intelligence: Option<String>,

    #[arg(long)]
    pub range: Option<String>,

    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Card server URL (defaults to the configured server-url)
    #[arg(long)]
    pub server: Option<String>,
}

impl AddArgs {
    /// The entered values as (form field, raw value) pairs.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("rarity", &self.rarity),
            ("image", &self.image),
            ("lore", &self.lore),
            ("hp", &self.hp),
            ("attack", &self.attack),
            ("defense", &self.defense),
            ("mana", &self.mana),
            ("speed", &self.speed),
            ("intelligence", &self.intelligence),
            ("range", &self.range),
            ("type", &self.kind),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}
