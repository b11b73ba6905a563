#[derive(Debug, Clone, clap::Parser)]
pub struct Cfg {
    /// The container implementation to test.
    pub implementation: Implementation,
    /// Number of producers that will put items into the container.
    #[arg(short, long)]
    pub producer_num: usize,
    /// Number of items each producer will put during the test.
    #[arg(short = 't', long)]
    pub item_num: usize,
    /// Number of consumers that will take items out of the container.
    #[arg(short, long, default_value_t = 1)]
    pub consumer_num: usize,
    /// Back-off of a consumer that found the container empty.
    #[arg(long, default_value_t = 50)]
    pub take_interval_us: u64,
    /// Hard cap on the test's execution time.
    #[arg(long, default_value_t = 10)]
    pub run_duration_seconds: u64,
}

#[derive(Debug, Clone, Copy, strum::EnumString, clap::ValueEnum)]
#[strum(serialize_all = "kebab-case")]
pub enum Implementation {
    #[strum(ascii_case_insensitive)]
    MaxPqueue,
    #[strum(ascii_case_insensitive)]
    MinPqueue,
    #[strum(ascii_case_insensitive)]
    Deque,
    #[strum(ascii_case_insensitive)]
    Queue,
    #[strum(ascii_case_insensitive)]
    Stack,
}
