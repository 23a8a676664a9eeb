use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use reroute::{net, EdgeId};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] net::Error);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Auto,
    Xml,
    Gz,
    Bz2,
}

impl From<Format> for net::FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => net::FileFormat::Unknown,
            Format::Xml => net::FileFormat::Xml,
            Format::Gz => net::FileFormat::XmlGz,
            Format::Bz2 => net::FileFormat::XmlBz2,
        }
    }
}

#[derive(Parser)]
struct Cli {
    /// The path to the SUMO network file
    net_file: PathBuf,

    /// Format of the network file
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Only keep the first of repeated connections between two edges
    #[arg(long)]
    dedup_connections: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate the two most distant edges of the network
    Diameter,

    /// Find the shortest route between two edges, using edge lengths as costs
    Route {
        /// Id of the start edge
        #[arg(allow_hyphen_values = true)]
        from: EdgeId,

        /// Id of the end edge
        #[arg(allow_hyphen_values = true)]
        to: EdgeId,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let options = net::Options {
        file_format: cli.format.into(),
        dedup_connections: cli.dedup_connections,
    };
    let g = load_graph(&cli.net_file, &options)?;

    match cli.command {
        Command::Diameter => match reroute::estimate_diameter(&g) {
            Some(d) => println!("{} {} {}", d.source, d.destination, d.distance),
            None => log::warn!("network has no edges"),
        },

        Command::Route { from, to } => {
            let route = reroute::find_route(&g, from, to, &g.free_flow_costs())?;
            for edge in route.edges.iter() {
                println!("{}", edge);
            }
            println!("cost: {}", route.cost);
        }
    }

    Ok(())
}

fn load_graph<P: AsRef<Path>>(
    path: P,
    options: &net::Options,
) -> Result<reroute::RoadGraph, GraphLoadError> {
    match net::load_graph_from_file(options, path.as_ref()) {
        Ok(g) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
