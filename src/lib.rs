pub mod config;
pub mod gender;
pub mod reference;

use std::io::Read;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use config::AppConfig;
use gender::{Classifier, DiacriticTable, RatioResult, Tally};

const USAGE: &str = "用法:
  gender-ratio [--json] [名单文件 | -]   识别参会者性别并计算比例（缺省从 stdin 读取）
  gender-ratio init                      在配置目录写入默认配置";

/// 命令行参数
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    json: bool,
    init: bool,
    help: bool,
    /// 显式指定 `-`，从 stdin 读取
    stdin: bool,
    roster: Option<String>,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    for arg in args {
        match arg.as_str() {
            "--json" => cli.json = true,
            "-h" | "--help" => cli.help = true,
            "init" if cli.roster.is_none() && !cli.stdin => cli.init = true,
            other if other.starts_with("--") => anyhow::bail!("未知参数: {}", other),
            other => {
                if cli.roster.is_some() || cli.stdin {
                    anyhow::bail!("只能指定一个名单来源（文件或 -）");
                }
                if other == "-" {
                    cli.stdin = true;
                } else {
                    cli.roster = Some(other.to_string());
                }
            }
        }
    }
    Ok(cli)
}

/// 一次识别的完整报告
#[derive(Debug, Serialize)]
pub struct Report {
    pub tally: Tally,
    /// 没有识别出任何男女名字时为 None
    pub ratio: Option<RatioResult>,
}

impl Report {
    pub fn build(classifier: &Classifier<'_>, roster: &[String]) -> Self {
        let tally = classifier.classify_all(roster);
        let ratio = match tally.ratio(roster.len() as u64) {
            Ok(ratio) => Some(ratio),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        };
        Self { tally, ratio }
    }

    /// 文本格式输出
    pub fn render(&self) -> String {
        let mut out = String::new();
        let groups = [
            ("male", &self.tally.male),
            ("female", &self.tally.female),
            ("unknown", &self.tally.unknown),
        ];
        for (label, names) in groups {
            for name in names.iter() {
                out.push_str(&format!("{}\t{}\n", name, label));
            }
        }

        match &self.ratio {
            Some(r) => out.push_str(&format!(
                "\n男: {} ({}%)\n女: {} ({}%)\n",
                r.boy_count, r.boy_percent, r.girl_count, r.girl_percent
            )),
            None => out.push_str("\n无法计算比例：没有识别出性别的名字\n"),
        }
        out
    }
}

/// 读取参会者名单（一行一个全名）
fn read_roster(source: Option<&str>) -> Result<Vec<String>> {
    let content = match source {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("读取参会者名单失败 {}: {}", path, e))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    Ok(content
        .lines()
        .map(reference::normalize_name)
        .filter(|line| !line.is_empty())
        .collect())
}

fn load_table(config: &AppConfig) -> Result<Option<DiacriticTable>> {
    match &config.diacritics {
        Some(path) => Ok(Some(DiacriticTable::from_path(path)?)),
        None => Ok(None),
    }
}

fn classify_roster(config: &AppConfig, base_dir: &Path, roster: &[String]) -> Result<Report> {
    let (male_path, female_path) = config.resolve_lists(base_dir);
    let male_names = reference::load_names(&male_path)?;
    let female_names = reference::load_names(&female_path)?;

    let custom_table = load_table(config)?;
    let table = custom_table.as_ref().unwrap_or_else(|| DiacriticTable::builtin());

    let classifier =
        Classifier::with_options(table, male_names, female_names, config.matcher.clone());
    Ok(Report::build(&classifier, roster))
}

pub fn run() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;

    if cli.help {
        println!("{}", USAGE);
        return Ok(());
    }

    if cli.init {
        let path = AppConfig::config_path()?;
        if path.exists() {
            anyhow::bail!("配置文件已存在: {:?}", path);
        }
        AppConfig::new().save_to_path(&path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = AppConfig::load()?;
    let base_dir = AppConfig::app_dir()?;
    let roster = read_roster(cli.roster.as_deref())?;
    let report = classify_roster(&config, &base_dir, &roster)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }

    Ok(())
}
