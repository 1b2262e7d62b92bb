use anyhow::Result;
use clap::{Parser, Subcommand};
use metaflux::designs::stent::StentSpec;
use metaflux::{Config, Pipeline};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Literature-to-CAD pipeline for printable metamaterials
#[derive(Parser)]
#[command(name = "metaflux")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and analyze recent metamaterial papers
    Lit {
        /// Search query
        #[arg(short, long)]
        query: Option<String>,
        /// How many years back to search
        #[arg(long)]
        years: Option<u32>,
        /// Maximum number of papers to fetch
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Generate a single parametric unit cell
    Cad {
        /// Cell period in meters
        #[arg(short, long, default_value_t = 80e-6)]
        period: f64,
        /// Cell height in meters
        #[arg(long, default_value_t = 150e-6)]
        height: f64,
        /// Title used for the output folder
        #[arg(long, default_value = "Manual_Generation")]
        title: String,
    },
    /// Automated paper-to-CAD generation from the scanned database
    Auto,
    /// Summarize the current paper database
    Analyze,
    /// Generate the auxetic arterial stent
    Stent {
        /// Target deployment diameter in meters
        #[arg(long, default_value_t = 20e-3)]
        diameter: f64,
        /// Stent length in meters
        #[arg(long, default_value_t = 50e-3)]
        length: f64,
        /// Wall thickness in meters
        #[arg(long, default_value_t = 3e-3)]
        wall: f64,
        /// Strut thickness in meters
        #[arg(long, default_value_t = 0.8e-3)]
        strut: f64,
    },
    /// Complete end-to-end run: scan, analyze, generate
    Pipeline {
        /// Search query
        #[arg(short, long)]
        query: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    fmt().with_env_filter(filter).with_target(true).init();

    let mut config = Config::load()?;
    if let Commands::Lit { years, limit, .. } = &cli.command {
        if let Some(years) = years {
            config.search.years = *years;
        }
        if let Some(limit) = limit {
            config.search.limit = *limit;
        }
        config.validate()?;
    }
    let pipeline = Pipeline::new(config)?;

    match cli.command {
        Commands::Lit { query, .. } => {
            let query = query.unwrap_or_else(|| pipeline.config().search.default_query.clone());
            let papers_file = pipeline.scan(&query).await?;
            println!("Literature analysis complete: {}", papers_file.display());

            let candidates = pipeline.candidates()?;
            println!("\nFound {} 3D-printable candidates:", candidates.len());
            for (i, paper) in candidates.iter().take(3).enumerate() {
                let title: String = paper.paper.title_or_unknown().chars().take(60).collect();
                println!("  {}. [{:.1}] {title}...", i + 1, paper.relevance_score);
            }
        }
        Commands::Cad {
            period,
            height,
            title,
        } => {
            let path = pipeline.generate_cell(period, height, &title)?;
            println!("{}", path.display());
        }
        Commands::Auto => {
            if !pipeline.papers_file().exists() {
                println!("No papers found. Running a literature scan first...");
                let query = pipeline.config().search.default_query.clone();
                pipeline.scan(&query).await?;
            }

            println!("Running automated paper-to-CAD pipeline...");
            let generated = pipeline.batch_generate()?;
            println!("\nGenerated {} STL files:", generated.len());
            for path in &generated {
                println!("  {}", path.display());
            }
        }
        Commands::Analyze => {
            if !pipeline.papers_file().exists() {
                println!("No papers database found. Run 'metaflux lit' first.");
                return Ok(());
            }

            let candidates = pipeline.candidates()?;
            println!("Analysis results:");
            println!("  Total 3D-printable candidates: {}", candidates.len());

            if let Some(top) = candidates.first() {
                println!("\nTop candidate:");
                println!("  Title: {}", top.paper.title_or_unknown());
                println!("  Score: {:.1}", top.relevance_score);
                let params = &top.extracted_params;
                if !params.dimensions.is_empty() {
                    println!("  Dimensions: {:?}", params.dimensions);
                }
                if !params.materials.is_empty() {
                    println!("  Materials: {:?}", params.materials);
                }
                if !params.functions.is_empty() {
                    println!("  Functions: {:?}", params.functions);
                }
            }
        }
        Commands::Stent {
            diameter,
            length,
            wall,
            strut,
        } => {
            let spec = StentSpec {
                target_diameter: diameter,
                length,
                wall_thickness: wall,
                strut_thickness: strut,
            };
            let path = pipeline.generate_stent(&spec)?;
            println!("Generated auxetic arterial stent: {}", path.display());
            println!("  - Target diameter: {:.1} mm", diameter * 1e3);
            println!("  - Length: {:.1} mm", length * 1e3);
            println!("  - Auxetic design: SM3 (square mode 3)");
        }
        Commands::Pipeline { query } => {
            let query = query.unwrap_or_else(|| pipeline.config().search.default_query.clone());
            println!("Starting complete MetaFlux pipeline...");

            println!("\nStep 1: Literature analysis");
            pipeline.scan(&query).await?;

            println!("\nStep 2: Parameter extraction");
            let candidates = pipeline.candidates()?;
            println!("Found {} viable candidates", candidates.len());

            println!("\nStep 3: Automated CAD generation");
            let generated = pipeline.batch_generate()?;

            println!("\nPipeline complete!");
            println!("  Papers analyzed: {}", candidates.len());
            println!("  STL files generated: {}", generated.len());
            println!(
                "  Output directory: {}",
                pipeline.config().paths.designs_dir.display()
            );
        }
    }

    Ok(())
}
