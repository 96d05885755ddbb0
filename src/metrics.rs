use prometheus::{IntCounterVec, Opts, Registry};

pub struct Metrics {
    pub transform_count: IntCounterVec,
    pub failure_count: IntCounterVec,
}

impl Metrics {
    pub fn new(registry: &Registry) -> Self {
        let transform_count = IntCounterVec::new(
            Opts::new("transform_count", "Number of successful transforms"),
            &["language"],
        )
        .unwrap();
        let failure_count = IntCounterVec::new(
            Opts::new("transform_failures", "Number of failed transforms"),
            &["language"],
        )
        .unwrap();
        registry.register(Box::new(transform_count.clone())).unwrap();
        registry.register(Box::new(failure_count.clone())).unwrap();
        Self {
            transform_count,
            failure_count,
        }
    }
}
