use flate2::write::GzEncoder;
use flate2::Compression;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    // Copy stations.csv to OUT_DIR for include_str
    let stations_src = Path::new("../fixtures/stations.csv");
    if stations_src.exists() {
        fs::copy(stations_src, Path::new(&out_dir).join("stations.csv")).unwrap();
    } else {
        fs::write(
            Path::new(&out_dir).join("stations.csv"),
            "NAME,DISTRICT,LATITUDE,LONGITUDE\nDongsi,Dongcheng,39.929247,116.417731\n",
        )
        .unwrap();
    }

    // daily_data.csv is ~1.4 MB of text. Gzip it at build time so the WASM
    // binary embeds compressed bytes and inflates them once on startup.
    let daily_src = Path::new("../fixtures/daily_data.csv");
    let daily_csv = if daily_src.exists() {
        fs::read(daily_src).unwrap()
    } else {
        b"date,station,AQI,AQI_level,PM2.5,PM10,SO2,NO2,CO,O3\n".to_vec()
    };

    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&daily_csv).unwrap();
    let compressed = encoder.finish().unwrap();
    fs::write(Path::new(&out_dir).join("daily_data.csv.gz"), compressed).unwrap();

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../fixtures/stations.csv");
    println!("cargo:rerun-if-changed=../fixtures/daily_data.csv");
}
