use trendlog::codec::{decode, encode, FAILURE_SECTION_MARKER};
use trendlog::model::{FailedSource, SourceSnapshot};

fn snapshot_with(titles: &[(&str, u32, &str, &str)]) -> SourceSnapshot {
    let mut snap = SourceSnapshot::new("soccer", "足球频道", "09时05分");
    for &(title, rank, url, mobile) in titles {
        snap.record(title, rank, Some(url), Some(mobile));
    }
    snap
}

#[test]
fn roundtrip_single_rank_titles() {
    let snap = snapshot_with(&[
        ("世界杯预选赛开打", 1, "https://a", "https://m.a"),
        ("联赛积分榜更新", 2, "", ""),
        ("转会窗口关闭", 3, "https://c", ""),
    ]);

    let text = encode(&[snap], &[]);
    let (decoded, diagnostics) = decode(&text);

    assert!(diagnostics.is_empty());
    assert_eq!(decoded.sections.len(), 1);

    let section = &decoded.sections[0];
    assert_eq!(section.alias, "足球频道");
    assert_eq!(section.source_id.as_deref(), Some("soccer"));
    assert_eq!(section.titles.len(), 3);

    let first = section.get("世界杯预选赛开打").unwrap();
    assert_eq!(first.rank, 1);
    assert_eq!(first.url.as_deref(), Some("https://a"));
    assert_eq!(first.mobile_url.as_deref(), Some("https://m.a"));

    let second = section.get("联赛积分榜更新").unwrap();
    assert_eq!(second.rank, 2);
    assert_eq!(second.url, None);
    assert_eq!(second.mobile_url, None);

    let third = section.get("转会窗口关闭").unwrap();
    assert_eq!(third.url.as_deref(), Some("https://c"));
    assert_eq!(third.mobile_url, None);
}

#[test]
fn multi_rank_titles_roundtrip_to_min_rank() {
    let mut snap = SourceSnapshot::new("soccer", "足球频道", "09时05分");
    snap.record("被顶上又跌落的标题", 7, None, None);
    snap.record("被顶上又跌落的标题", 2, None, None);
    snap.record("普通标题", 1, None, None);

    let text = encode(&[snap], &[]);
    let (decoded, _) = decode(&text);

    // lossy: only the minimum rank survives the file format
    let rec = decoded.sections[0].get("被顶上又跌落的标题").unwrap();
    assert_eq!(rec.rank, 2);
}

#[test]
fn encode_sorts_by_min_rank_with_stable_ties() {
    let mut snap = SourceSnapshot::new("s", "源", "10时00分");
    snap.record("丙", 5, None, None);
    snap.record("甲", 2, None, None);
    snap.record("乙", 2, None, None); // ties keep discovery order: 甲 before 乙

    let text = encode(&[snap], &[]);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "源 (ID: s)");
    assert_eq!(lines[1], "2. 甲");
    assert_eq!(lines[2], "2. 乙");
    assert_eq!(lines[3], "5. 丙");
}

#[test]
fn failure_section_is_written_and_skipped_on_decode() {
    let snap = snapshot_with(&[("标题一", 1, "", ""), ("标题二", 2, "", "")]);
    let failures = vec![FailedSource {
        source_id: "saijia".to_string(),
        alias: "赛加频道".to_string(),
    }];

    let text = encode(&[snap], &failures);
    assert!(text.contains(FAILURE_SECTION_MARKER));
    assert!(text.contains("赛加频道 (ID: saijia)"));

    let (decoded, diagnostics) = decode(&text);
    assert!(diagnostics.is_empty());
    assert_eq!(decoded.sections.len(), 1);
    assert!(decoded.section("赛加频道").is_none());
}

#[test]
fn undersized_sections_are_skipped() {
    let text = "只有标题行的孤立段\n\n正常频道\n1. 标题\n";
    let (decoded, diagnostics) = decode(text);
    assert!(diagnostics.is_empty());
    assert_eq!(decoded.sections.len(), 1);
    assert_eq!(decoded.sections[0].alias, "正常频道");
}

#[test]
fn legacy_header_without_id_decodes() {
    let text = "足球频道\n1. 标题甲\n2. 标题乙\n";
    let (decoded, _) = decode(text);
    let section = &decoded.sections[0];
    assert_eq!(section.alias, "足球频道");
    assert_eq!(section.source_id, None);
    assert_eq!(section.titles.len(), 2);
}

#[test]
fn non_digit_prefix_means_implicit_rank_one() {
    let text = "频道 (ID: c)\n置顶·不带排名的标题\n3.5. 小数前缀留在标题里\n";
    let (decoded, diagnostics) = decode(text);
    assert!(diagnostics.is_empty());

    let section = &decoded.sections[0];
    assert_eq!(section.titles[0].title, "置顶·不带排名的标题");
    assert_eq!(section.titles[0].rank, 1);
    assert_eq!(section.titles[1].title, "3.5. 小数前缀留在标题里");
    assert_eq!(section.titles[1].rank, 1);
}

#[test]
fn bad_lines_are_skipped_and_reported_without_aborting() {
    let text = "频道 (ID: c)\n1. 好标题\n99999999999999999999. 排名溢出\n2. 另一个好标题\n";
    let (decoded, diagnostics) = decode(text);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].line_no, 3);

    let section = &decoded.sections[0];
    assert_eq!(section.titles.len(), 2);
    assert!(section.get("好标题").is_some());
    assert!(section.get("另一个好标题").is_some());
}

#[test]
fn randomized_tagless_roundtrip() {
    // Seeded generator, titles drawn from a tag-free alphabet, one rank each:
    // the grammar must reproduce title/url/rank exactly.
    let mut rng = oorandom::Rand32::new(0x7e6d);
    let alphabet: Vec<char> = "热点新闻标题体育财经科技abcdefg".chars().collect();

    for round in 0..20 {
        let mut snap = SourceSnapshot::new("rnd", "随机源", "12时00分");
        let count = 1 + (rng.rand_u32() % 12) as usize;
        let mut titles = Vec::new();
        for i in 0..count {
            let len = 2 + (rng.rand_u32() % 10) as usize;
            let mut title: String = (0..len)
                .map(|_| alphabet[(rng.rand_u32() as usize) % alphabet.len()])
                .collect();
            // keep titles unique so records stay 1:1 with lines
            title.push_str(&format!("#{}", i));
            let rank = 1 + (rng.rand_u32() % 50);
            let url = if rng.rand_u32() % 2 == 0 {
                format!("https://example.com/{}", rng.rand_u32())
            } else {
                String::new()
            };
            snap.record(&title, rank, Some(&url), None);
            titles.push((title, rank, url));
        }

        let text = encode(&[snap], &[]);
        let (decoded, diagnostics) = decode(&text);
        assert!(diagnostics.is_empty(), "round {}: {:?}", round, diagnostics);

        let section = &decoded.sections[0];
        assert_eq!(section.titles.len(), titles.len(), "round {}", round);
        for (title, rank, url) in titles {
            let rec = section.get(&title).expect("title must round-trip");
            assert_eq!(rec.rank, rank);
            if url.is_empty() {
                assert_eq!(rec.url, None);
            } else {
                assert_eq!(rec.url.as_deref(), Some(url.as_str()));
            }
        }
    }
}
