//! Sachagrilla CLI: generate grids, show solutions, collect data.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use sachagrilla_core::collector::{self, ClarinScraper};
use sachagrilla_core::{GenerateOutcome, GrillaConfig, Scheduler, SqliteStore};

mod render;

/// Sachagrilla - Generador de grillas de palabras con frase oculta
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Ruta a la base de datos SQLite (default: sachagrilla.db)
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Archivo de configuración JSON
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Genera una grilla nueva
    Nueva {
        /// Incluye la solución con la grilla
        #[arg(short, long)]
        solucion: bool,
    },

    /// Muestra la solución de una grilla existente
    Solucion {
        /// Número de grilla
        nbr: i64,
    },

    /// Recolecta palabras, significados y frases de la web
    Recolectar {
        /// Cantidad de páginas a descargar
        #[arg(short, long, default_value_t = 5)]
        cantidad: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => GrillaConfig::from_file(path)
            .with_context(|| format!("leyendo configuración de {}", path.display()))?,
        None => GrillaConfig::default(),
    };
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }

    println!(">>> BIENVENIDO A SACHAGRILLA!");
    match cli.command {
        Commands::Nueva { solucion } => cmd_nueva(&config, solucion)?,
        Commands::Solucion { nbr } => cmd_solucion(&config, nbr)?,
        Commands::Recolectar { cantidad } => cmd_recolectar(&config, cantidad).await?,
    }
    println!(">>> GRACIAS POR USAR SACHAGRILLA! QUE NUNCA TE FALTEN LAS PALABRAS ┑(^_^)┍");
    Ok(())
}

fn cmd_nueva(config: &GrillaConfig, include_solution: bool) -> anyhow::Result<()> {
    let mut store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("abriendo base de datos {}", config.db_path.display()))?;

    println!(">>> Generando sachagrilla...");
    let mut scheduler = Scheduler::new(config.scheduler.clone());
    match scheduler.generate(&mut store)? {
        GenerateOutcome::Generated(grid_id) => {
            println!(">>> Sachagrilla N° {grid_id} lista!");
            let solution = store
                .find_solution(grid_id)?
                .context("la grilla recién generada no está en la base de datos")?;
            print!("{}", render::render_grid(&solution, include_solution));
        }
        GenerateOutcome::Exhausted { attempts } => {
            eprintln!(
                "WARNING Esta grilla estaba muy difícil (se agotaron {attempts} intentos)... \
                 Intente nuevamente!"
            );
        }
    }
    Ok(())
}

fn cmd_solucion(config: &GrillaConfig, grid_id: i64) -> anyhow::Result<()> {
    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("abriendo base de datos {}", config.db_path.display()))?;

    match store.find_solution(grid_id)? {
        Some(solution) => print!("{}", render::render_solution(&solution)),
        None => {
            eprintln!(
                "WARNING No existe la grilla N° {grid_id}. \
                 Genere una grilla nueva o imprima la solución de alguna existente."
            );
            let available: Vec<String> = store
                .available_grids()?
                .iter()
                .map(|id| id.to_string())
                .collect();
            println!(">>> Grillas disponibles: {}", available.join(" - "));
        }
    }
    Ok(())
}

async fn cmd_recolectar(config: &GrillaConfig, pages: usize) -> anyhow::Result<()> {
    let mut store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("abriendo base de datos {}", config.db_path.display()))?;
    let scraper = ClarinScraper::new(&config.scraper_base_url);

    println!(">>> Iniciando scraping de {pages} páginas...");
    let report = collector::collect(&mut store, &scraper, pages).await?;
    println!(
        ">>> Sacamos {} frases y {} palabras con significado ({} duplicados omitidos).",
        report.quotes_saved, report.words_saved, report.duplicates
    );
    println!(
        ">>> N° de última grilla scrapeada guardado: {}",
        report.cursor.next_grid
    );
    Ok(())
}
