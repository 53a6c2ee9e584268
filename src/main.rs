use clap::Parser;
use roster_etl::core::roster;
use roster_etl::utils::logger;
use roster_etl::{
    CliConfig, Command, EtlEngine, EtlError, LocalStorage, NewStudent, Roster, RunConfig,
    StudentFilter, StudentPipeline,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!("{} (stage: {})", e, e.stage());
        tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<(), EtlError> {
    let config = cli.resolve()?;
    let storage = LocalStorage::default();

    match cli.command.unwrap_or(Command::Convert) {
        Command::Convert => convert(storage, config).await,
        Command::List { search, gender } => {
            let roster = Roster::new(storage, config.output_path);
            let students = roster.list(&StudentFilter { search, gender }).await;
            roster::render_table(&students).printstd();
            Ok(())
        }
        Command::Add {
            student_id,
            name,
            gender,
            email,
            course,
            year,
            university,
        } => {
            let roster = Roster::new(storage, config.output_path);
            let student = roster
                .add(NewStudent {
                    student_id,
                    name,
                    gender,
                    email,
                    course,
                    year,
                    university,
                })
                .await?;
            println!(
                "Student {} added to {}",
                roster::display_value(&student.student_id),
                roster.path()
            );
            Ok(())
        }
        Command::Remove { student_id } => {
            let roster = Roster::new(storage, config.output_path);
            roster.remove(&student_id).await?;
            println!("Student {} deleted from {}", student_id, roster.path());
            Ok(())
        }
    }
}

async fn convert(storage: LocalStorage, config: RunConfig) -> Result<(), EtlError> {
    let monitor_enabled = config.monitor;

    let pipeline = StudentPipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    let output_path = engine.run().await?;
    println!("{} created successfully!", output_path);
    Ok(())
}
