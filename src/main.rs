//! ElevenLabs TTS - 命令行入口
//!
//! 扮演宿主的角色：加载配置、初始化日志、创建并校验插件，然后执行子命令

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use elevenlabs_tts::application::{ElevenLabsTts, SpeechApiPort};
use elevenlabs_tts::config::{load_config_from_path, print_config, sample_configs, AppConfig};
use elevenlabs_tts::infrastructure::FakeSpeechApi;
use elevenlabs_tts::plugin;

#[derive(Debug, Parser)]
#[command(name = "elevenlabs-tts", version, about = "ElevenLabs text-to-speech plugin")]
struct Cli {
    /// 配置文件路径（默认搜索 elevenlabs.toml / elevenlabs.local.toml）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 使用内置 Fake 服务，不访问网络
    #[arg(long, global = true)]
    fake: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 合成一段文本
    Speak {
        text: String,
        /// 建议的输出路径，扩展名会被替换为 .mp3
        #[arg(short, long, default_value = "out.wav")]
        output: PathBuf,
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// 运行激活前校验
    Validate,
    /// 列出账号可用的音色
    Voices,
    /// 输出每种语言的示例配置
    SampleConfig {
        #[arg(long, value_enum, default_value_t = SampleFormat::Json)]
        format: SampleFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SampleFormat {
    Json,
    Toml,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    if let Command::SampleConfig { format } = cli.command {
        let samples = sample_configs();
        let rendered = match format {
            SampleFormat::Json => serde_json::to_string_pretty(&samples)?,
            SampleFormat::Toml => toml::to_string_pretty(&samples)?,
        };
        println!("{}", rendered);
        return Ok(());
    }

    print_config(&config);

    let tts = if cli.fake {
        let api: Arc<dyn SpeechApiPort> = Arc::new(FakeSpeechApi::with_defaults());
        let tts = ElevenLabsTts::new(config.plugin.clone(), api)?;
        tts.validate().await?;
        tts
    } else {
        plugin::connect(&config).await?
    };

    match cli.command {
        Command::Speak { text, output, lang } => {
            let path = tts.get_tts(&text, &output, lang.as_deref()).await?;
            tracing::info!(path = %path.display(), "Speech written");
            println!("{}", path.display());
        }
        Command::Validate => {
            println!("ok");
        }
        Command::Voices => {
            for voice in tts.api().list_voices().await? {
                println!(
                    "{}\t{}",
                    voice.voice_id,
                    voice.name.as_deref().unwrap_or("-")
                );
            }
        }
        Command::SampleConfig { .. } => {}
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},elevenlabs_tts={}",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    // 日志写 stderr，stdout 只输出结果
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
