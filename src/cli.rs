//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::csv_repository_adapter::CsvRepositoryAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::memory_cache::MemoryCache;
use crate::domain::error::ChartfolioError;
use crate::domain::timeframe::Timeframe;
use crate::ports::cache_port::{NoopCache, ResultCache};
use crate::ports::price_port::PriceSource;
use crate::service::chart_service::DEFAULT_BINS;
use crate::service::{ChartService, PortfolioService};

#[derive(Parser, Debug)]
#[command(name = "chartfolio", about = "Stock chart indicator and portfolio valuation engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the chart payload for a symbol
    Chart {
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "1d")]
        timeframe: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compute the volume profile for a symbol
    VolumeProfile {
        #[arg(long)]
        symbol: String,
        #[arg(long, default_value = "1d")]
        timeframe: String,
        #[arg(long, default_value_t = DEFAULT_BINS)]
        bins: usize,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Value the portfolio from recorded purchase lots
    Portfolio {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List symbols with price data available
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Chart {
            symbol,
            timeframe,
            config,
            output,
        } => run_chart(&symbol, &timeframe, config.as_ref(), output.as_ref()),
        Command::VolumeProfile {
            symbol,
            timeframe,
            bins,
            config,
            output,
        } => run_volume_profile(&symbol, &timeframe, bins, config.as_ref(), output.as_ref()),
        Command::Portfolio { config, output } => run_portfolio(config.as_ref(), output.as_ref()),
        Command::ListSymbols { config } => run_list_symbols(config.as_ref()),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    match path {
        Some(path) => FileConfigAdapter::from_file(path).map_err(|e| {
            let err = ChartfolioError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            };
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }),
        None => Ok(FileConfigAdapter::empty()),
    }
}

fn parse_timeframe(value: &str) -> Result<Timeframe, ExitCode> {
    value.parse().map_err(|e: ChartfolioError| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn emit_json<T: serde::Serialize>(value: &T, output: Option<&PathBuf>) -> ExitCode {
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: failed to serialize response: {e}");
            return ExitCode::FAILURE;
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                let err = ChartfolioError::from(e);
                eprintln!("error: {err}");
                return ExitCode::from(&err);
            }
            println!("wrote {}", path.display());
            ExitCode::SUCCESS
        }
        None => {
            println!("{json}");
            ExitCode::SUCCESS
        }
    }
}

fn report(err: &ChartfolioError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

fn run_chart(
    symbol: &str,
    timeframe: &str,
    config: Option<&PathBuf>,
    output: Option<&PathBuf>,
) -> ExitCode {
    let config = match load_config(config) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let timeframe = match parse_timeframe(timeframe) {
        Ok(tf) => tf,
        Err(code) => return code,
    };

    let prices = CsvPriceAdapter::new(config.data_directory());
    let memory_cache;
    let noop_cache;
    let cache: &dyn ResultCache = if config.cache_enabled() {
        memory_cache = MemoryCache::new();
        &memory_cache
    } else {
        noop_cache = NoopCache;
        &noop_cache
    };

    let service = ChartService::new(&prices, cache)
        .with_ttl(std::time::Duration::from_secs(config.cache_ttl_seconds()));

    match service.chart(symbol, timeframe) {
        Ok(response) => emit_json(&response, output),
        Err(e) => report(&e),
    }
}

fn run_volume_profile(
    symbol: &str,
    timeframe: &str,
    bins: usize,
    config: Option<&PathBuf>,
    output: Option<&PathBuf>,
) -> ExitCode {
    let config = match load_config(config) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let timeframe = match parse_timeframe(timeframe) {
        Ok(tf) => tf,
        Err(code) => return code,
    };

    let prices = CsvPriceAdapter::new(config.data_directory());
    let cache = NoopCache;
    let service = ChartService::new(&prices, &cache);

    match service.volume_profile(symbol, timeframe, bins) {
        Ok(response) => emit_json(&response, output),
        Err(e) => report(&e),
    }
}

fn run_portfolio(config: Option<&PathBuf>, output: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let repository = CsvRepositoryAdapter::new(config.data_directory());
    let prices = CsvPriceAdapter::new(config.data_directory());
    let service = PortfolioService::new(&repository, &prices);

    match service.valuation() {
        Ok(response) => emit_json(&response, output),
        Err(e) => report(&e),
    }
}

fn run_list_symbols(config: Option<&PathBuf>) -> ExitCode {
    let config = match load_config(config) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let prices = CsvPriceAdapter::new(config.data_directory());
    match prices.list_symbols() {
        Ok(symbols) => {
            for symbol in symbols {
                println!("{symbol}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}
