use derive_more::{Display, Error};

// normalization factors from the ec2 reserved instance modification table
// http://docs.aws.amazon.com/AWSEC2/latest/UserGuide/ri-modification-instancemove.html
const FACTORS: [(&str, f64); 12] = [
    ("nano", 0.25),
    ("micro", 0.5),
    ("small", 1.),
    ("medium", 2.),
    ("large", 4.),
    ("xlarge", 8.),
    ("2xlarge", 16.),
    ("4xlarge", 32.),
    ("8xlarge", 64.),
    ("10xlarge", 80.),
    ("16xlarge", 128.),
    ("32xlarge", 256.),
];

#[derive(Debug, Display, Error)]
#[display(fmt = "unknown instance size {}", size)]
pub struct UnknownSize {
    #[error(not(source))]
    pub size: String,
}

pub struct NormalizationFactor;

impl NormalizationFactor {
    /// All known sizes, smallest to largest. The order is the table's, not
    /// lexicographic, and size enumeration everywhere else follows it.
    pub fn sorted_all_sizes() -> impl Iterator<Item = &'static str> {
        FACTORS.iter().map(|(size, _)| *size)
    }

    pub fn value(size: &str) -> anyhow::Result<f64> {
        FACTORS
            .iter()
            .find(|(name, _)| *name == size)
            .map(|(_, value)| *value)
            .ok_or_else(|| UnknownSize { size: size.into() }.into())
    }
}
