use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Booster generations in flight order with the share of the schedule they fly.
const BOOSTERS: [(&str, usize); 5] = [("v1.0", 5), ("v1.1", 15), ("FT", 24), ("B4", 11), ("B5", 5)];

/// Success odds per booster generation, in percent.
fn success_rate(booster: &str) -> u64 {
    match booster {
        "v1.0" => 20,
        "v1.1" => 35,
        "FT" => 70,
        "B4" => 55,
        _ => 90,
    }
}

/// Deterministic 0..100 value for a flight (splitmix64 finaliser).
fn roll(flight: u64) -> u64 {
    let mut z = flight.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (z ^ (z >> 31)) % 100
}

fn main() {
    let mut sites = Vec::new();
    let mut payloads = Vec::new();
    let mut classes = Vec::new();
    let mut boosters = Vec::new();

    let mut flight: u64 = 0;
    for (booster, flights) in BOOSTERS {
        for _ in 0..flights {
            let site = SITES[(roll(flight * 7 + 1) % SITES.len() as u64) as usize];
            // Later generations lift heavier payloads; keep to whole kilograms.
            let ceiling = 3000 + 2500 * (flight / 12);
            let payload = (roll(flight * 13 + 5) * ceiling / 100) as f64;
            let class = i64::from(roll(flight) < success_rate(booster));

            sites.push(site);
            payloads.push(payload);
            classes.push(class);
            boosters.push(booster);
            flight += 1;
        }
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(sites.clone())),
            Arc::new(Float64Array::from(payloads.clone())),
            Arc::new(Int64Array::from(classes.clone())),
            Arc::new(StringArray::from(boosters.clone())),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_launches.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    // Write CSV with the same columns
    let csv_path = "sample_launches.csv";
    let mut csv_writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    csv_writer
        .write_record(["Launch Site", "Payload Mass (kg)", "class", "Booster Version Category"])
        .expect("Failed to write CSV header");
    for i in 0..sites.len() {
        csv_writer
            .write_record([
                sites[i].to_string(),
                format!("{:.1}", payloads[i]),
                classes[i].to_string(),
                boosters[i].to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    csv_writer.flush().expect("Failed to flush CSV");

    let table = pretty_format_batches(&[batch]).expect("Failed to format batch");
    println!("{table}");
    println!("Wrote {flight} launches to {parquet_path} and {csv_path}");
}
