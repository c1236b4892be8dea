//! End-to-end: CSV file -> series -> colors -> Vega-Lite

use std::io::Write;

use rankhue::presets::{MBTI, SUBWAY};
use rankhue::reader::{
    filter_eq, series_from_frame, series_from_row, sum_columns, CachedReader, CsvReader, TokenTally,
};
use rankhue::writer::{BarChart, VegaLiteWriter, Writer};
use rankhue::{assign_extremes, ColorFormat, HighlightMode, LabelMatcher, Rgb};

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_country_mbti_bars() {
    let file = write_csv(
        "Country,INFJ,ENFP,ISTJ,INTP\n\
         Korea,0.05,0.12,0.09,0.07\n\
         Japan,0.06,0.08,0.11,0.10\n",
    );
    let path = file.path().to_str().unwrap().to_string();

    let mut reader = CachedReader::new(CsvReader::new());
    let df = reader.load(&path).unwrap();
    let series = series_from_row(df, "Country", "Korea").unwrap();

    let gradient = MBTI.build().unwrap();
    let colors = gradient.assign(&series, &HighlightMode::Extremum).unwrap();

    assert_eq!(colors.domain(), vec!["ENFP", "ISTJ", "INTP", "INFJ"]);
    assert_eq!(colors.hex("ENFP").as_deref(), Some("#ff4136"));
    assert_eq!(colors.hex("ISTJ").as_deref(), Some("#1f77b4"));
    assert_ne!(colors.hex("INFJ").as_deref(), Some("#ffffff"));

    let chart = BarChart::new(colors).with_title("Korea - MBTI");
    let json = VegaLiteWriter::new().write(&chart).unwrap();
    let spec: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(spec["layer"][0]["encoding"]["color"]["scale"]["range"][0], "#ff4136");

    // second lookup is served from the cache
    assert!(reader.is_cached(&path));
    assert_eq!(reader.load(&path).unwrap().height(), 2);
}

#[test]
fn test_subway_top_stations() {
    let file = write_csv(
        "사용일자,노선명,역명,승차총승객수,하차총승객수\n\
         20251001,2호선,강남,50000,52000\n\
         20251001,2호선,잠실,45000,44000\n\
         20251001,2호선,홍대입구,47000,48000\n\
         20251001,1호선,서울역,60000,61000\n\
         20251002,2호선,강남,1,1\n",
    );
    let reader = CsvReader::new();
    let df = rankhue::reader::Reader::read(&reader, file.path().to_str().unwrap()).unwrap();

    let df = filter_eq(&df, "사용일자", "20251001").unwrap();
    let df = filter_eq(&df, "노선명", "2호선").unwrap();
    let df = sum_columns(&df, &["승차총승객수", "하차총승객수"], "승하차합계").unwrap();
    let series = series_from_frame(&df, "역명", "승하차합계").unwrap().top_n(10).unwrap();

    let colors = SUBWAY
        .build()
        .unwrap()
        .assign(&series, &HighlightMode::Extremum)
        .unwrap();
    let range = colors.range(ColorFormat::Rgb);
    assert_eq!(colors.domain(), vec!["강남", "홍대입구", "잠실"]);
    assert_eq!(range[0], "rgb(255, 0, 0)");
    assert_eq!(range[1], "rgb(0, 0, 255)");
    // full cap: the last station reaches the pale endpoint
    assert_eq!(range[2], "rgb(230, 230, 255)");
}

#[test]
fn test_predicate_highlight_from_csv() {
    let file = write_csv("country,score\nJapan,9\nKorea,3\nChina,1\n");
    let df = rankhue::reader::Reader::read(&CsvReader::new(), file.path().to_str().unwrap())
        .unwrap();
    let series = series_from_frame(&df, "country", "score").unwrap();

    let mode = HighlightMode::Predicate(LabelMatcher::contains("Korea"));
    let colors = rankhue::assign_colors(&series, "red", "blue", "white", &mode).unwrap();

    assert_eq!(colors.highlighted().unwrap().label, "Korea");
    assert_eq!(colors.hex("Japan").as_deref(), Some("#0000ff"));
    let china = colors.get("China").unwrap();
    assert!(china.red() > 0 && china != Rgb::new(255, 255, 255));
}

#[test]
fn test_region_message_counts() {
    let file = write_csv(
        "발송일시,대상지역\n\
         2025-10-01,\"부산광역시 해운대구,수영구\"\n\
         2025-10-02,해운대구\n\
         2025-10-03,기장\n",
    );
    let df = rankhue::reader::Reader::read(&CsvReader::new(), file.path().to_str().unwrap())
        .unwrap();
    let series = TokenTally::busan_districts()
        .tally_column(&df, "대상지역")
        .unwrap();

    let red = Rgb::new(255, 0, 0);
    let blue = Rgb::new(0, 0, 255);
    let yellow = Rgb::new(255, 255, 0);
    let colors = assign_extremes(&series, red, blue, yellow);

    assert_eq!(colors.len(), 16);
    assert_eq!(colors.get("해운대구"), Some(red));
    // 중구 is the first district with zero messages
    assert_eq!(colors.get("중구"), Some(blue));
    assert_eq!(colors.get("수영구"), Some(yellow));
    assert_eq!(colors.get("기장군"), Some(yellow));
}
