use clap::Parser;
use flow_header_toolbox::{app, config, i18n};

/// CLI 인자.
#[derive(Parser)]
#[command(name = "flow_header_toolbox", about = "타공 헤더 수력 설계 CLI")]
struct Cli {
    /// 언어 코드 (auto/ko/en-us)
    #[arg(short = 'L', long = "lang", default_value = "auto")]
    lang: String,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, None);
    app::run(&mut cfg, &tr)?;
    Ok(())
}
