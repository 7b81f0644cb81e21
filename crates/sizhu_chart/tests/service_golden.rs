//! End-to-end charts through the assembly service.

use sizhu_chart::{
    BirthRequest, CallerId, ChartConfig, ChartService, MemoryRepository, PersistenceStatus,
};
use sizhu_time::ResolutionSource;

fn service() -> ChartService {
    ChartService::new(ChartConfig::default()).unwrap()
}

#[test]
fn chart_outside_term_data_is_approximate() {
    let out = service().compute(&BirthRequest::new("1850-05-17", "08:30"), None).unwrap();
    assert_eq!(out.chart.four_pillars().to_string(), "庚戌 辛巳 戊辰 丙辰");
    assert_eq!(out.chart.solar.source, ResolutionSource::Approximate);
}

#[test]
fn may_1990_full_chart() {
    let req = BirthRequest {
        name: "Lin".into(),
        gender: "F".into(),
        location: Some("Taipei".into()),
        true_solar_time: true,
        ..BirthRequest::new("1990-05-17", "08:30")
    };
    let out = service().compute(&req, None).unwrap();
    let c = &out.chart;

    assert_eq!(c.four_pillars().to_string(), "庚午 辛巳 壬午 甲辰");
    assert_eq!(c.solar.source, ResolutionSource::Embedded);

    assert_eq!(c.elements.wood, 1.5);
    assert_eq!(c.elements.fire, 3.0);
    assert_eq!(c.elements.earth, 1.0);
    assert_eq!(c.elements.metal, 3.0);
    assert_eq!(c.elements.water, 1.5);
    assert_eq!((c.polarity.yin, c.polarity.yang), (25, 75));

    let ids: Vec<&str> = c.markers.iter().map(|m| m.rule_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["tianyi", "taiji", "tiande", "yuede", "jiangxing", "wangshen", "guasu", "sanhui"]
    );

    // pass-through fields are echoed, not interpreted
    assert_eq!(out.request, req);
}

#[test]
fn start_of_spring_2024_uses_embedded_terms() {
    let out = service()
        .compute(&BirthRequest::new("2024-02-04", "16:27"), None)
        .unwrap();
    assert_eq!(out.chart.four_pillars().to_string(), "甲辰 丙寅 戊戌 庚申");
    assert_eq!(out.chart.solar.source, ResolutionSource::Embedded);

    let before = service()
        .compute(&BirthRequest::new("2024-02-04", "16:26"), None)
        .unwrap();
    assert_eq!(before.chart.four_pillars().to_string(), "癸卯 乙丑 戊戌 庚申");
}

#[test]
fn offset_changes_the_resolved_instant() {
    // 16:27 at UTC+9 is 07:27 UTC, before Start of Spring
    let req = BirthRequest {
        offset_minutes: Some(540),
        ..BirthRequest::new("2024-02-04", "16:27")
    };
    let out = service().compute(&req, None).unwrap();
    assert_eq!(out.chart.four_pillars().to_string(), "癸卯 乙丑 戊戌 庚申");
}

#[test]
fn identical_input_gives_identical_json() {
    let svc = service();
    let req = BirthRequest::new("2024-12-31", "23:30");
    let a = serde_json::to_string(&svc.compute(&req, None).unwrap()).unwrap();
    let b = serde_json::to_string(&svc.compute(&req, None).unwrap()).unwrap();
    assert_eq!(a, b);

    let other = service();
    let c = serde_json::to_string(&other.compute(&req, None).unwrap()).unwrap();
    assert_eq!(a, c);
}

#[test]
fn stored_record_id_is_stable() {
    let caller = CallerId::new("member-7");
    let req = BirthRequest::new("1990-05-17", "08:30");
    let first = service()
        .with_repository(MemoryRepository::new())
        .compute(&req, Some(&caller))
        .unwrap();
    let second = service()
        .with_repository(MemoryRepository::new())
        .compute(&req, Some(&caller))
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn padded_catalog_name_stores_under_the_same_id() {
    let caller = CallerId::new("member-7");
    let plain = BirthRequest {
        catalog: Some("classic".into()),
        ..BirthRequest::new("1990-05-17", "08:30")
    };
    let padded = BirthRequest {
        catalog: Some("  classic ".into()),
        ..plain.clone()
    };
    let id_of = |req: &BirthRequest| {
        let out = service()
            .with_repository(MemoryRepository::new())
            .compute(req, Some(&caller))
            .unwrap();
        assert_eq!(out.chart.catalog, "classic");
        match out.persistence {
            PersistenceStatus::Stored { record_id } => record_id,
            other => panic!("unexpected persistence {other:?}"),
        }
    };
    assert_eq!(id_of(&plain), id_of(&padded));
}

#[test]
fn output_json_shape() {
    let out = service()
        .compute(&BirthRequest::new("2024-02-04", "16:27"), None)
        .unwrap();
    let v = serde_json::to_value(&out).unwrap();
    for key in [
        "request",
        "moment",
        "utc_instant",
        "pillars",
        "elements",
        "polarity",
        "roles",
        "solar",
        "catalog",
        "catalog_version",
        "markers",
        "persistence",
    ] {
        assert!(v.get(key).is_some(), "missing {key}");
    }
    assert_eq!(v["pillars"].as_array().unwrap().len(), 4);
    assert_eq!(v["pillars"][0]["nayin"]["name"], "覆灯火");
    assert_eq!(v["persistence"]["status"], "guest");
    assert_eq!(v["solar"]["source"], "embedded");
    assert_eq!(v["utc_instant"], "2024-02-04T08:27:00Z");
}
