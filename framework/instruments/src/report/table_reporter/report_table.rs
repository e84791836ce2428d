use tabled::Tabled;

#[derive(Tabled)]
pub struct ReportRow {
    pub scenario: String,
    pub iters: u64,
    #[tabled(display = "float3")]
    pub mean_ns_total: f64,
    #[tabled(display = "optional_float3")]
    pub mean_ns_overhead: Option<f64>,
    #[tabled(display = "optional_float3")]
    pub mean_ns_subtracted: Option<f64>,
}

fn float3(n: &f64) -> String {
    format!("{:.3}", n)
}

fn optional_float3(n: &Option<f64>) -> String {
    n.as_ref().map(float3).unwrap_or_else(|| "-".to_string())
}
