use clap::Parser;

/// 批量调用 Token 接口，为账号列表生成 Token
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<String>,

    /// 账号列表文件路径（覆盖配置）
    #[arg(short, long)]
    pub input: Option<String>,

    /// Token 输出文件路径（覆盖配置）
    #[arg(short, long)]
    pub output: Option<String>,
}
