//! WSN 拓扑图生成
//!
//! 读取 network.csv / routing.csv / mac.csv，输出拓扑图与指标曲线的 JSON 文档

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use wsn_topomap::config::MapConfig;
use wsn_topomap::ingest::{
    IngestError, MetricTable, TimeUnit, read_observations_from_path, read_table_from_path,
};
use wsn_topomap::layout::{LayoutKind, circular_layout, geo_layout, layout_tree_view, load_node_positions};
use wsn_topomap::metrics::metric_panels;
use wsn_topomap::topo::{NodeId, TieBreak, Topology, TopologyBuilder, resolve_path_graph};
use wsn_topomap::viz::{
    GraphView, MetricsDocument, TopologyDocument, VizError, adjacency_view, geo_view, path_view,
    tree_view, write_json,
};

#[derive(Debug, Parser)]
#[command(
    name = "topomap",
    about = "Generate topology map and metric charts for a WSN from its CSV logs"
)]
struct Args {
    /// Address of the sink
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    sink: u32,

    /// Map config JSON (colors, sizes, edge styles)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "network.csv")]
    network_csv: PathBuf,

    #[arg(long, default_value = "routing.csv")]
    routing_csv: PathBuf,

    #[arg(long, default_value = "mac.csv")]
    mac_csv: PathBuf,

    /// Node positions CSV (Node, Lat, Long) for the geographic view
    #[arg(long)]
    node_pos: Option<PathBuf>,

    /// Encoding of the Timestamp column
    #[arg(long, value_enum, default_value_t = TimeUnit::Seconds)]
    time_unit: TimeUnit,

    /// Layout of the network tree
    #[arg(long, value_enum, default_value_t = LayoutKind::Circular)]
    layout: LayoutKind,

    /// Which of several same-timestamp reports wins
    #[arg(long, value_enum, default_value_t = TieBreak::FirstSeen)]
    tie_break: TieBreak,

    /// Output directory
    #[arg(long, default_value = "plots")]
    out_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Viz(#[from] VizError),
}

fn read_if_exists(path: &Path, unit: TimeUnit) -> Result<Option<MetricTable>, IngestError> {
    if !path.exists() {
        info!(path = %path.display(), "文件不存在，跳过");
        return Ok(None);
    }
    read_table_from_path(path, unit).map(Some)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn geo_graph(path: &Path, topo: &Topology, cfg: &MapConfig) -> Option<GraphView> {
    let positions = match load_node_positions(path) {
        Ok(p) => p,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "无法读取节点位置，跳过地理视图");
            return None;
        }
    };
    let nodes = if topo.routing_tree.is_empty() {
        topo.adjacency_nodes()
    } else {
        topo.tree_nodes()
    };
    match geo_layout(&positions, &nodes) {
        Ok(pos) => Some(geo_view(topo, &pos, cfg)),
        Err(missing) => {
            warn!(?missing, path = %path.display(), "部分节点缺少位置，跳过地理视图");
            None
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let cfg = MapConfig::load_or_default(args.config.as_deref());
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let sink = NodeId(args.sink);

    let routing = read_if_exists(&args.routing_csv, args.time_unit)?;
    let path_rows = routing.as_ref().map(|t| t.path_rows()).unwrap_or_default();

    let network_exists = args.network_csv.exists();
    if network_exists || !path_rows.is_empty() {
        let observations = if network_exists {
            let (schema, obs) = read_observations_from_path(&args.network_csv, args.time_unit)?;
            info!(?schema, rows = obs.len(), "network.csv 已读取");
            obs
        } else {
            Vec::new()
        };
        let topo = TopologyBuilder::new(sink, &cfg)
            .with_tie_break(args.tie_break)
            .build(&observations);

        let mut graphs = Vec::new();
        if !path_rows.is_empty() {
            let paths = resolve_path_graph(&path_rows, &topo.adjacency);
            let mut ids: Vec<NodeId> = paths.iter().flat_map(|e| [e.from, e.to]).collect();
            ids.push(sink);
            graphs.push(path_view(&topo, &paths, &circular_layout(&ids), &cfg));
        }
        if network_exists {
            let tree_pos = layout_tree_view(args.layout, &topo.routing_tree, sink, &topo.tree_nodes());
            graphs.push(tree_view(&topo, &tree_pos, &cfg));
            graphs.push(adjacency_view(&topo, &circular_layout(&topo.adjacency_nodes()), &cfg));
            if let Some(geo) = args.node_pos.as_deref().and_then(|p| geo_graph(p, &topo, &cfg)) {
                graphs.push(geo);
            }
        }

        let doc = TopologyDocument {
            title: format!("Network Topology : {generated_at}"),
            generated_at: generated_at.clone(),
            sink,
            config: cfg.clone(),
            graphs,
        };
        write_json(&args.out_dir.join("network_graph.json"), &doc)?;
        println!(
            "network: nodes={}, tree_edges={}, adjacency_edges={}, single_next_hop={}",
            topo.node_states.len(),
            topo.routing_tree.len(),
            topo.adjacency.len(),
            topo.has_single_next_hops()
        );
    } else {
        info!(path = %args.network_csv.display(), "文件不存在，跳过拓扑图");
    }

    let mac = read_if_exists(&args.mac_csv, args.time_unit)?;
    for (layer, table) in [("routing", routing), ("mac", mac)] {
        let Some(table) = table else { continue };
        let panels = metric_panels(&table);
        if panels.is_empty() {
            warn!(layer, "没有有效指标，跳过绘图");
            continue;
        }
        let doc = MetricsDocument {
            title: format!("{} Parameters : {generated_at}", capitalize(layer)),
            generated_at: generated_at.clone(),
            layer: layer.to_string(),
            panels,
        };
        write_json(&args.out_dir.join(format!("{layer}.json")), &doc)?;
        println!("{layer}: panels={}", doc.panels.len());
    }
    Ok(())
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "topomap 运行失败");
            ExitCode::FAILURE
        }
    }
}
