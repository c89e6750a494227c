use clap::Parser;
use endmember::io::load_f32_tiff;
use endmember::{
    select_batch, Candidate, EndmemberError, EndmemberResult, EndmemberSelector, Endmembers,
    FallbackPolicy, MatchOutcome, OwnedRaster, SceneBands, SearchWindow, SelectConfig, Stage,
    Strategy, Variant,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Endmember CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output (percentile cuts, candidate counts, fallbacks).
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum VariantConfig {
    #[default]
    Stepp,
    Asebal,
}

impl From<VariantConfig> for Variant {
    fn from(value: VariantConfig) -> Self {
        match value {
            VariantConfig::Stepp => Variant::Stepp,
            VariantConfig::Asebal => Variant::Asebal,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum FallbackConfig {
    Fail,
    FirstCandidates,
}

impl From<FallbackConfig> for FallbackPolicy {
    fn from(value: FallbackConfig) -> Self {
        match value {
            FallbackConfig::Fail => FallbackPolicy::Fail,
            FallbackConfig::FirstCandidates => FallbackPolicy::FirstCandidates,
        }
    }
}

fn default_max_probes() -> usize {
    16
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
enum StrategyConfig {
    #[default]
    SinglePass,
    TwoPass {
        #[serde(default = "default_max_probes")]
        max_probes: usize,
    },
}

impl From<StrategyConfig> for Strategy {
    fn from(value: StrategyConfig) -> Self {
        match value {
            StrategyConfig::SinglePass => Strategy::SinglePass,
            StrategyConfig::TwoPass { max_probes } => Strategy::TwoPass { max_probes },
        }
    }
}

#[derive(Debug, Deserialize)]
struct SceneConfig {
    name: Option<String>,
    ndvi: PathBuf,
    surface_temperature: PathBuf,
    albedo: PathBuf,
    net_radiation: PathBuf,
    soil_heat: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    scenes: Vec<SceneConfig>,
    variant: VariantConfig,
    height_limit: usize,
    width_limit: usize,
    /// Overrides the variant's default no-match policy.
    fallback: Option<FallbackConfig>,
    strategy: StrategyConfig,
    parallel: bool,
    output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let window = SearchWindow::default();
        Self {
            scenes: Vec::new(),
            variant: VariantConfig::default(),
            height_limit: window.height_limit,
            width_limit: window.width_limit,
            fallback: None,
            strategy: StrategyConfig::default(),
            parallel: false,
            output_path: None,
        }
    }
}

impl Config {
    fn select_config(&mut self) -> SelectConfig {
        let variant = Variant::from(std::mem::take(&mut self.variant));
        let fallback = self
            .fallback
            .take()
            .map(FallbackPolicy::from)
            .unwrap_or_else(|| variant.default_fallback());
        SelectConfig {
            variant,
            window: SearchWindow::new(self.height_limit, self.width_limit),
            fallback,
            strategy: std::mem::take(&mut self.strategy).into(),
        }
    }
}

struct LoadedScene {
    ndvi: OwnedRaster,
    surface_temperature: OwnedRaster,
    albedo: OwnedRaster,
    net_radiation: OwnedRaster,
    soil_heat: OwnedRaster,
}

impl LoadedScene {
    fn load(scene: &SceneConfig) -> EndmemberResult<Self> {
        Ok(Self {
            ndvi: load_f32_tiff(&scene.ndvi)?,
            surface_temperature: load_f32_tiff(&scene.surface_temperature)?,
            albedo: load_f32_tiff(&scene.albedo)?,
            net_radiation: load_f32_tiff(&scene.net_radiation)?,
            soil_heat: load_f32_tiff(&scene.soil_heat)?,
        })
    }

    fn bands(&self) -> EndmemberResult<SceneBands<'_>> {
        SceneBands::new(
            self.ndvi.view(),
            self.surface_temperature.view(),
            self.albedo.view(),
            self.net_radiation.view(),
            self.soil_heat.view(),
        )
    }
}

#[derive(Debug, Serialize)]
struct CandidateRecord {
    line: usize,
    col: usize,
    ndvi: f32,
    temperature: f32,
    net_radiation: f32,
    soil_heat_flux: f32,
    ho: f32,
}

impl From<Candidate> for CandidateRecord {
    fn from(value: Candidate) -> Self {
        Self {
            line: value.line,
            col: value.col,
            ndvi: value.ndvi,
            temperature: value.temperature,
            net_radiation: value.net_radiation,
            soil_heat_flux: value.soil_heat_flux,
            ho: value.ho,
        }
    }
}

#[derive(Debug, Serialize)]
struct SceneRecord {
    name: String,
    outcome: Option<&'static str>,
    hot: Option<CandidateRecord>,
    cold: Option<CandidateRecord>,
    stage: Option<&'static str>,
    error: Option<String>,
}

impl SceneRecord {
    fn new(name: String, result: Result<Endmembers, EndmemberError>) -> Self {
        match result {
            Ok(picked) => Self {
                name,
                outcome: Some(outcome_name(picked.outcome)),
                hot: Some(picked.hot.into()),
                cold: Some(picked.cold.into()),
                stage: None,
                error: None,
            },
            Err(err) => Self {
                name,
                outcome: None,
                hot: None,
                cold: None,
                stage: Some(stage_name(err.stage())),
                error: Some(err.to_string()),
            },
        }
    }
}

fn outcome_name(outcome: MatchOutcome) -> &'static str {
    match outcome {
        MatchOutcome::Windowed => "windowed",
        MatchOutcome::Refined => "refined",
        MatchOutcome::Unconstrained => "unconstrained",
    }
}

fn stage_name(stage: Stage) -> &'static str {
    match stage {
        Stage::Input => "input",
        Stage::Classifying => "classifying",
        Stage::Matching => "matching",
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("endmember=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let mut config: Config = serde_json::from_str(&config_text)?;
    if config.scenes.is_empty() {
        return Err("at least one scene must be listed in the config".into());
    }
    let select_cfg = config.select_config();
    select_cfg.validate()?;

    let loaded = config
        .scenes
        .iter()
        .map(LoadedScene::load)
        .collect::<EndmemberResult<Vec<_>>>()?;
    let bands = loaded
        .iter()
        .map(LoadedScene::bands)
        .collect::<EndmemberResult<Vec<_>>>()?;
    tracing::info!(scenes = bands.len(), parallel = config.parallel, "scenes loaded");

    let results = if config.parallel {
        select_batch(&bands, &select_cfg)
    } else {
        let selector = EndmemberSelector::new(select_cfg);
        bands.iter().map(|scene| selector.select(scene)).collect()
    };

    let records: Vec<SceneRecord> = config
        .scenes
        .iter()
        .zip(results)
        .map(|(scene, result)| {
            let name = scene
                .name
                .clone()
                .unwrap_or_else(|| scene.ndvi.display().to_string());
            SceneRecord::new(name, result)
        })
        .collect();
    let failed = records.iter().filter(|record| record.error.is_some()).count();
    let json = serde_json::to_string_pretty(&records)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    if failed > 0 {
        return Err(format!("{failed} of {} scenes failed", records.len()).into());
    }
    Ok(())
}
