//! 웨어하우스 배치 적재 CLI.

use clap::{Parser, Subcommand};
use warehouse_core::{init_logging, LogConfig};
use warehouse_data::{Database, EastmoneyClient, EastmoneySymbolProvider, WarehouseStore};
use warehouse_etl::{modules, EtlConfig};

#[derive(Parser)]
#[command(name = "warehouse-etl")]
#[command(about = "Market data warehouse batch loader", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 펀드 일봉 정규화 (ods → dwd_ohlc_fund_incr_daily)
    DwdFundOhlc,

    /// A주 전체 종목 목록 적재 (ods_info_stock_full_adata)
    OdsStockFull,

    /// 펀드 일봉 원천 수집 (ods_ohlc_fund_incr_efinance_daily)
    OdsFundOhlc {
        /// 특정 펀드만 수집 (쉼표로 구분, 예: "510300,SZ.159919")
        #[arg(long)]
        codes: Option<String>,
    },

    /// 펀드 기본정보 적재 (dwd_info_fund_full)
    DwdFundInfo,

    /// 전체 워크플로우 실행 (펀드 기본정보 → 일봉 수집 → 정규화 → 종목 목록)
    RunAll,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 로깅 초기화
    init_logging(LogConfig::for_workspace(&cli.log_level).with_env_format())
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    tracing::info!("Warehouse ETL 시작");

    // 설정 로드
    let config = EtlConfig::from_env()?;
    tracing::debug!(
        max_connections = config.database.max_connections,
        chunk_size = config.write.chunk_size,
        "설정 로드 완료"
    );

    // DB 연결
    let db = Database::connect(&config.database).await?;
    let store = WarehouseStore::new(db.clone()).with_chunk_size(config.write.chunk_size);

    let client = EastmoneyClient::with_config(config.provider.eastmoney())?;

    // 명령 실행
    let outcome = run_command(cli.command, &config, &store, client).await;

    db.close().await;
    outcome?;

    tracing::info!("Warehouse ETL 종료");
    Ok(())
}

async fn run_command(
    command: Commands,
    config: &EtlConfig,
    store: &WarehouseStore,
    client: EastmoneyClient,
) -> anyhow::Result<()> {
    match command {
        Commands::DwdFundOhlc => {
            let stats = modules::build_dwd_fund_ohlc(store).await?;
            stats.log_summary("펀드 일봉 정규화");
        }
        Commands::OdsStockFull => {
            let provider = EastmoneySymbolProvider::new(client);
            let stats = modules::load_ods_stock_full(store, &provider).await?;
            stats.log_summary("종목 목록");
        }
        Commands::OdsFundOhlc { codes } => {
            let stats =
                modules::fetch_ods_fund_ohlc(store, &client, &config.ohlc_fetch, codes).await?;
            stats.log_summary("펀드 일봉 수집");
        }
        Commands::DwdFundInfo => {
            let provider = EastmoneySymbolProvider::new(client);
            let stats = modules::load_dwd_fund_info(store, &provider).await?;
            stats.log_summary("펀드 기본정보");
        }
        Commands::RunAll => {
            let provider = EastmoneySymbolProvider::new(client.clone());
            modules::run_all(store, &provider, &client, &config.ohlc_fetch).await?;
        }
    }
    Ok(())
}
