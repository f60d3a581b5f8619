use book_roi::core::display;
use book_roi::core::session::Reply;
use book_roi::utils::{logger, validation::Validate};
use book_roi::{CliConfig, RoiCalculator, Session, SubmissionSink};
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting book-roi");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 載入並驗證配置
    let settings = match config.resolve().and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let sink = SubmissionSink::from_config(settings.submission.clone());
    if sink.is_enabled() {
        tracing::info!("📮 Results will be forwarded to the lead form");
    }

    let mut session = Session::new(RoiCalculator::new(sink), &settings);

    if config.interactive {
        run_interactive(&mut session).await?;
    } else {
        let projection = session.calculate();
        println!("{}", display::render_projection(&projection));
        if config.verbose {
            println!("\n{}", display::render_breakdown(&projection));
        }
    }

    // 結果已輸出；只在程序結束前給背景送出一點時間
    session
        .calculator()
        .sink()
        .drain(Duration::from_secs(config.drain_timeout_secs))
        .await;

    Ok(())
}

async fn run_interactive(session: &mut Session) -> anyhow::Result<()> {
    println!("Book ROI Calculator\n");
    println!("{}\n", session.render());
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match session.handle_line(&line) {
            Ok(Reply::Text(text)) => println!("{}", text),
            Ok(Reply::Quit) => break,
            Err(e) => {
                tracing::debug!("Rejected input {:?}: {}", line, e);
                println!("{}. {}", e.user_friendly_message(), e.recovery_suggestion());
            }
        }
    }

    Ok(())
}
