use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "Drupal Wrapped")]
pub struct Args {
    #[arg(long, required = true)]
    pub username: String,

    #[arg(long, default_value_t = 2025)]
    pub year: i32,

    #[arg(long, default_value = "https://www.drupal.org")]
    pub host: String,

    #[arg(long)]
    pub json: bool,

    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}
