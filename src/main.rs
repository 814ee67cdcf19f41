mod cli;

use bom_explorer::adapters::outbound::console::StderrNotifier;
use bom_explorer::adapters::outbound::filesystem::SnapshotFileRepository;
use bom_explorer::adapters::outbound::network::HttpBomRepository;
use bom_explorer::application::dto::{BomRequest, LoadMode, OutputFormat};
use bom_explorer::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use bom_explorer::application::use_cases::BomEditorSession;
use bom_explorer::bom_structure::domain::{ComponentSource, NodeId};
use bom_explorer::bom_structure::policies::{LockEvaluator, MutationPlanner, PolicyViolation};
use bom_explorer::bom_structure::services::{DragGesture, DropZoneClassifier, NodeRect};
use bom_explorer::config::{discover_config, load_config_from_path, ConfigFile};
use bom_explorer::ports::outbound::{BomRepository, Notifier};
use bom_explorer::shared::error::{BomError, ExitCode};
use bom_explorer::shared::Result;
use cli::{Args, ClassifyArgs, Command, LockArgs, PlanDropArgs, PointerArgs, ShowArgs};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

const DEFAULT_MAX_LEVEL: u32 = 10;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        let exit_code = if e.downcast_ref::<PolicyViolation>().is_some() {
            eprintln!("\n🔒 Operation refused:\n");
            ExitCode::OperationBlocked
        } else {
            eprintln!("\n❌ An error occurred:\n");
            ExitCode::ApplicationError
        };
        eprintln!("{}", e);

        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(exit_code.as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Show(show) => run_show(show, &config).await,
        Command::Classify(classify) => {
            run_classify(classify);
            Ok(())
        }
        Command::Lock(lock) => run_lock(lock).await,
        Command::PlanDrop(plan) => run_plan_drop(plan).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(path) => load_config_from_path(path),
        None => Ok(discover_config(&std::env::current_dir()?)?.unwrap_or_default()),
    }
}

async fn run_show(show: ShowArgs, config: &ConfigFile) -> Result<()> {
    // CLI flags override config values, which override defaults
    let format = match show.format {
        Some(format) => format,
        None => config
            .format
            .as_deref()
            .map(str::parse::<OutputFormat>)
            .transpose()
            .map_err(|message| BomError::Validation { message })?
            .unwrap_or_default(),
    };
    let version = show.version.or_else(|| config.version.clone());
    let mode = if show.multilevel {
        LoadMode::Multilevel {
            max_level: show
                .max_level
                .or(config.max_level)
                .unwrap_or(DEFAULT_MAX_LEVEL),
        }
    } else {
        LoadMode::Full
    };
    let presenter_type = PresenterType::from(show.output);

    if let Some(path) = show.snapshot {
        let request = BomRequest::new(show.bom.unwrap_or_default(), version, mode);
        let repository = SnapshotFileRepository::new(path);
        return render(repository, request, format, presenter_type).await;
    }

    let base_url = show
        .api_url
        .or_else(|| config.api_base_url.clone())
        .ok_or_else(|| BomError::Validation {
            message: "Either --snapshot or --api-url (or api_base_url in the config file) is required"
                .to_string(),
        })?;
    let bom_id = show.bom.ok_or_else(|| BomError::Validation {
        message: "--bom is required when reading from the BOM API".to_string(),
    })?;
    let timeout = Duration::from_secs(
        config
            .timeout_secs
            .unwrap_or(HttpBomRepository::DEFAULT_TIMEOUT_SECS),
    );

    let repository = HttpBomRepository::new(&base_url, timeout)?;
    let request = BomRequest::new(bom_id, version, mode);
    render(repository, request, format, presenter_type).await
}

async fn render<R: BomRepository>(
    repository: R,
    request: BomRequest,
    format: OutputFormat,
    presenter_type: PresenterType,
) -> Result<()> {
    let session = BomEditorSession::new(repository, notifier(), request);
    session.reload().await?;

    session
        .notifier()
        .report(FormatterFactory::progress_message(format));
    let output = FormatterFactory::create(format).format(&session.read_model())?;

    PresenterFactory::create(presenter_type).present(&output)
}

fn node_rect(pointer: &PointerArgs) -> NodeRect {
    NodeRect::new(pointer.left, 0.0, pointer.width, 1.0)
}

fn run_classify(args: ClassifyArgs) {
    let mode = DropZoneClassifier::classify(
        args.level,
        node_rect(&args.pointer),
        args.pointer.x,
        args.pointer.force_replace,
    );
    println!("{}", mode);
}

fn notifier() -> StderrNotifier {
    if std::io::stderr().is_terminal() {
        StderrNotifier::new()
    } else {
        StderrNotifier::without_colors()
    }
}

async fn load_snapshot(
    path: PathBuf,
) -> Result<BomEditorSession<SnapshotFileRepository, StderrNotifier>> {
    let session = BomEditorSession::new(
        SnapshotFileRepository::new(path),
        notifier(),
        BomRequest::new("", None, LoadMode::Full),
    );
    session.reload().await?;
    Ok(session)
}

async fn run_lock(args: LockArgs) -> Result<()> {
    let session = load_snapshot(args.snapshot).await?;
    let node = NodeId::new(args.node);
    let forest = session.forest();

    let target = forest.find(&node).ok_or_else(|| BomError::NodeNotFound {
        node_id: node.to_string(),
    })?;
    if target.is_cycle() {
        return Err(BomError::Validation {
            message: format!("'{}' is a routing step; locks apply to components", node),
        }
        .into());
    }

    let locked = LockEvaluator::is_node_locked(&forest, &node, args.operation).unwrap_or(false);
    println!("{}", if locked { "locked" } else { "unlocked" });
    Ok(())
}

async fn run_plan_drop(args: PlanDropArgs) -> Result<()> {
    let session = load_snapshot(args.snapshot).await?;
    let node = NodeId::new(args.node);

    let level = session
        .forest()
        .find(&node)
        .map(|target| target.level)
        .ok_or_else(|| BomError::NodeNotFound {
            node_id: node.to_string(),
        })?;

    let payload = match (args.item, args.temporary) {
        (Some(item_id), _) => ComponentSource::Existing {
            item_id,
            quantity: args.quantity,
        },
        (None, Some(description)) => ComponentSource::Temporary {
            description,
            quantity: args.quantity,
            uom: args.uom,
        },
        (None, None) => {
            return Err(BomError::Validation {
                message: "Either --item or --temporary is required".to_string(),
            }
            .into())
        }
    };

    let mut gesture = DragGesture::start(payload);
    gesture.set_force_replace(args.pointer.force_replace);
    gesture.hover(&node, level, node_rect(&args.pointer), args.pointer.x);
    let drop = gesture.drop().ok_or_else(|| BomError::NodeNotFound {
        node_id: node.to_string(),
    })?;

    let forest = session.forest();
    let displayed = session.displayed_bom();
    let intent = MutationPlanner::new(&forest, displayed.as_deref()).plan_drop(&drop)?;

    println!("{}", serde_json::to_string_pretty(&intent)?);
    Ok(())
}
