//! 基准测试消息时延统计
//!
//! 读取 benchmark/recv.csv（SentTimestamp / RecvTimestamp / SeqId），输出每对节点的时延曲线与汇总

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use wsn_topomap::ingest::{IngestError, TimeUnit, read_table_from_path};
use wsn_topomap::metrics::{DelayError, delay_report};
use wsn_topomap::viz::{DelayDocument, VizError, write_json};

#[derive(Debug, Parser)]
#[command(name = "bench_delay", about = "Message delay statistics for a WSN benchmark run")]
struct Args {
    #[arg(long, default_value = "benchmark/recv.csv")]
    recv_csv: PathBuf,

    /// Encoding of the timestamp columns
    #[arg(long, value_enum, default_value_t = TimeUnit::Millis)]
    time_unit: TimeUnit,

    #[arg(long, default_value = "benchmark/msg_delay.json")]
    out: PathBuf,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Delay(#[from] DelayError),
    #[error(transparent)]
    Viz(#[from] VizError),
}

fn run(args: &Args) -> Result<(), AppError> {
    let table = read_table_from_path(&args.recv_csv, args.time_unit)?;
    let report = delay_report(&table)?;
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    println!("pairs: {}", report.pairs.len());
    match &report.aggregate {
        Some(s) => println!(
            "delay (s): avg={:.2}, median={:.2}, min={:.2}, max={:.2}",
            s.avg, s.median, s.min, s.max
        ),
        None => println!("delay (s): no samples"),
    }

    let doc = DelayDocument {
        title: format!("Message Delay : {generated_at}"),
        generated_at,
        report,
    };
    write_json(&args.out, &doc)?;
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
            error!(error = %e, "bench_delay 运行失败");
            ExitCode::FAILURE
        }
    }
}
