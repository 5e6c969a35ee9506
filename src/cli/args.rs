use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Paging options shared by every paginated command
#[derive(Args, Debug, Clone, Default)]
pub struct PagingArgs {
    /// Page number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Results per page
    #[arg(short = 's', long)]
    pub size: Option<u32>,

    /// Sort order (accuracy, recency, distance)
    #[arg(long)]
    pub sort: Option<String>,

    /// Fetch every remaining page
    #[arg(short, long)]
    pub all: bool,

    /// Save the fetched pages to a .json or .xml file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Search command arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub command: SearchCommand,
}

#[derive(Subcommand, Debug)]
pub enum SearchCommand {
    /// Search web documents
    #[command(alias = "w")]
    Web {
        query: String,
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Search video clips
    #[command(alias = "v")]
    Video {
        query: String,
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Search images
    #[command(alias = "i")]
    Image {
        query: String,
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Search blog posts
    #[command(alias = "b")]
    Blog {
        query: String,
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Search cafe posts
    #[command(alias = "c")]
    Cafe {
        query: String,
        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Search books
    Book {
        query: String,

        /// Field to match (title, isbn, publisher, person)
        #[arg(short, long)]
        target: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },
}

/// Center, radius and rectangle filters for place searches
#[derive(Args, Debug, Clone, Default)]
pub struct AreaArgs {
    /// Center longitude
    #[arg(short = 'x', long, allow_negative_numbers = true, requires = "y")]
    pub x: Option<f64>,

    /// Center latitude
    #[arg(short = 'y', long, allow_negative_numbers = true, requires = "x")]
    pub y: Option<f64>,

    /// Radius around the center in meters (0-20000)
    #[arg(short, long)]
    pub radius: Option<u32>,

    /// Rectangle as min_x,min_y,max_x,max_y
    #[arg(long, value_delimiter = ',', num_args = 4, allow_negative_numbers = true)]
    pub rect: Option<Vec<f64>>,
}

/// Local command arguments
#[derive(Args, Debug)]
pub struct LocalArgs {
    #[command(subcommand)]
    pub command: LocalCommand,
}

#[derive(Subcommand, Debug)]
pub enum LocalCommand {
    /// Find coordinates of an address
    #[command(alias = "a")]
    Address {
        query: String,

        /// Matching mode (similar, exact)
        #[arg(long)]
        analyze_type: Option<String>,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Search places by keyword
    #[command(alias = "k")]
    Keyword {
        query: String,

        /// Category group code, e.g. CE7 for cafes
        #[arg(short, long)]
        category: Option<String>,

        #[command(flatten)]
        area: AreaArgs,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// Search places by category group code
    Category {
        /// Category group code, e.g. MT1 for large supermarkets
        code: String,

        #[command(flatten)]
        area: AreaArgs,

        #[command(flatten)]
        paging: PagingArgs,
    },

    /// List the category group codes
    Categories,

    /// Region containing a coordinate
    Region {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,

        /// Coordinate system of the input
        #[arg(long)]
        input_coord: Option<String>,

        /// Coordinate system of the output
        #[arg(long)]
        output_coord: Option<String>,
    },

    /// Address at a coordinate
    AddressOf {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,

        /// Coordinate system of the input
        #[arg(long)]
        input_coord: Option<String>,
    },

    /// Convert a coordinate between systems
    Transcoord {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,

        /// Target coordinate system
        #[arg(long)]
        to: String,

        /// Source coordinate system (default WGS84)
        #[arg(long)]
        from: Option<String>,
    },
}

/// Translate command arguments
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Text to translate
    pub text: String,

    /// Source language code
    #[arg(long, default_value = "kr")]
    pub from: String,

    /// Target language code
    #[arg(long, default_value = "en")]
    pub to: String,
}

/// Vision command arguments
#[derive(Args, Debug)]
pub struct VisionArgs {
    #[command(subcommand)]
    pub command: VisionCommand,
}

#[derive(Subcommand, Debug)]
pub enum VisionCommand {
    /// Recognize text in an image file
    Ocr { file: PathBuf },

    /// Detect faces
    Face {
        /// Image URL or file path
        image: String,

        /// Detection threshold (0.1-1.0)
        #[arg(short, long)]
        threshold: Option<f32>,
    },

    /// Detect products
    Product {
        /// Image URL or file path
        image: String,

        /// Detection threshold (0.1-1.0)
        #[arg(short, long)]
        threshold: Option<f32>,
    },

    /// Generate tags
    Tag {
        /// Image URL or file path
        image: String,
    },

    /// Score adult content
    Adult {
        /// Image URL or file path
        image: String,
    },

    /// Find or crop a thumbnail area
    Thumbnail {
        /// Image URL or file path
        image: String,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,

        /// Return a cropped image URL instead of the area
        #[arg(long)]
        crop: bool,
    },
}

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key (e.g. auth.rest_api_key)
        key: String,
        value: String,
    },

    /// Get a configuration value
    Get { key: String },

    /// List all configuration values
    List,

    /// Show configuration file path
    Path,
}
