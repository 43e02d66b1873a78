use clap::Args;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use yggdrasil_green::catalog::{
    write_score_report, DirectoryError, JsonProductDirectory, Product, ScoreReportRow,
    ScoreService,
};
use yggdrasil_green::config::AppConfig;
use yggdrasil_green::error::AppError;
use yggdrasil_green::scoring::{
    FileScoringConfigStore, GreenScorer, ScoreColor, ScoreRating, ScoreResult, ValidationMode,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Product record (JSON) to score
    #[arg(long)]
    pub(crate) product: PathBuf,
    /// Weight table to use instead of SCORING_CONFIG_PATH
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Accept weight tables whose weights do not sum to 1.0
    #[arg(long)]
    pub(crate) relaxed: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Write the CSV report to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        product,
        config,
        relaxed,
    } = args;

    let app_config = AppConfig::load()?;
    let config_path = config.unwrap_or(app_config.scoring.config_path);
    let mode = if relaxed {
        ValidationMode::Relaxed
    } else {
        app_config.scoring.validation
    };

    let (record, result) = score_product_file(&product, &config_path, mode)?;
    print!("{}", render_score(&record, &result));
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = ScoreService::new(
        Arc::new(JsonProductDirectory::new(&config.catalog.data_dir)),
        Arc::new(FileScoringConfigStore::new(
            &config.scoring.config_path,
            config.scoring.validation,
        )),
    );

    let rows = service.report()?;
    let stale = rows.iter().filter(|row| row.is_stale()).count();

    match args.output {
        Some(path) => {
            let file = File::create(&path)?;
            write_score_report(&rows, file)?;
            println!(
                "Wrote {} product score(s) to {} ({} stored score(s) out of date)",
                rows.len(),
                path.display(),
                stale
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_score_report(&rows, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}

pub(crate) fn score_product_file(
    product: &Path,
    config: &Path,
    mode: ValidationMode,
) -> Result<(Product, ScoreResult), AppError> {
    let raw = std::fs::read_to_string(product)?;
    let record: Product =
        serde_json::from_str(&raw).map_err(|source| DirectoryError::Malformed {
            path: product.to_path_buf(),
            source,
        })?;
    record
        .validate()
        .map_err(|violation| DirectoryError::InvalidRecord {
            path: product.to_path_buf(),
            violation,
        })?;

    let scorer = GreenScorer::new(Arc::new(FileScoringConfigStore::new(config, mode)));
    let result = scorer.score(&record.lifecycle_stages)?;
    Ok((record, result))
}

pub(crate) fn render_score(product: &Product, result: &ScoreResult) -> String {
    let rating = ScoreRating::from_score(result.green_score);
    let color = ScoreColor::from_score(result.green_score);

    let mut output = String::new();
    output.push_str(&format!("{} ({})\n", product.name, product.id));
    output.push_str(&format!(
        "  Green score: {:.1} [{}, {}]\n",
        result.green_score,
        rating,
        color.as_str()
    ));
    output.push_str(&format!("  Carbon: {:.2} kg CO2e\n", result.carbon_kg));
    output.push_str(&format!("  Scoring version: {}\n", result.scoring_version));
    if ScoreReportRow::new(product, result).is_stale() {
        output.push_str(&format!(
            "  Stored score {:.1} ({}) differs from the recomputed score\n",
            product.green_score, product.scoring_version
        ));
    }
    output
}
