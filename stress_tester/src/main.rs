use std::sync::Arc;

use cfg::Cfg;
use clap::Parser;
use lane::{
    Container, Deque, PQType, PQueue, Queue, Stack,
    test::stress::{Job, StressElem, StressTestConfig, run_stress_test},
};

pub mod cfg;

fn main() {
    let cfg = cfg::Cfg::parse();
    println!("Running configuration:\n{cfg:#?}");

    let res = match cfg.implementation {
        cfg::Implementation::MaxPqueue => run_pqueue(&cfg, PQType::Max),
        cfg::Implementation::MinPqueue => run_pqueue(&cfg, PQType::Min),
        cfg::Implementation::Deque => run_container(&cfg, Arc::new(Deque::<Job>::new())),
        cfg::Implementation::Queue => run_container(&cfg, Arc::new(Queue::<Job>::new())),
        cfg::Implementation::Stack => run_container(&cfg, Arc::new(Stack::<Job>::new())),
    };
    if let Err(e) = res {
        eprintln!("Error: {e:?}");
    }
}

fn stress_config(cfg: &Cfg) -> anyhow::Result<StressTestConfig> {
    let total = cfg
        .item_num
        .checked_mul(cfg.producer_num)
        .ok_or_else(|| anyhow::anyhow!("Overflow while calculating the total item count"))?;
    println!("Total items to put: {total}");

    Ok(StressTestConfig {
        num_producers: cfg.producer_num,
        num_items: cfg.item_num,
        num_consumers: cfg.consumer_num,
        payload_size_range: (16, 256),
        take_interval_us: cfg.take_interval_us,
        priority_range: (-1_000, 1_000),
        run_duration_seconds: cfg.run_duration_seconds,
    })
}

fn run_container<C>(cfg: &Cfg, container: Arc<C>) -> anyhow::Result<()>
where
    C: Container,
    C::Elem: StressElem,
{
    let results = run_stress_test(container, stress_config(cfg)?)?;
    results.print_summary();
    Ok(())
}

fn run_pqueue(cfg: &Cfg, ordering: PQType) -> anyhow::Result<()> {
    let queue = Arc::new(PQueue::<Job>::new(ordering));
    run_container(cfg, Arc::clone(&queue))?;

    println!("Heap property holds: {}", queue.is_heap_ordered());
    if let Some(head) = queue.peek_with(|item| item.priority()) {
        println!("Next priority to pop: {head}");
    }
    Ok(())
}
