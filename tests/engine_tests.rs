use std::io::Write;

use video_tfidf_recommender::{
    AnchorSelector, Corpus, Engine, EngineConfig, EngineError, EngineHandle, RawRecord, TrendingFilter,
};

const HEADER: &str = "id,title,tags,description,channel,category_id,country,views,likes,dislikes,comment_count,thumbnail_url,publish_time";

fn raw(id: &str, title: &str, tags: &str, channel: &str, counts: (u64, u64, u64, u64)) -> RawRecord {
    let (views, likes, dislikes, comments) = counts;
    RawRecord {
        id: Some(id.into()),
        title: Some(title.into()),
        tags: Some(tags.into()),
        channel: Some(channel.into()),
        views: Some(views.to_string()),
        likes: Some(likes.to_string()),
        dislikes: Some(dislikes.to_string()),
        comment_count: Some(comments.to_string()),
        ..Default::default()
    }
}

fn scenario_engine() -> Engine {
    let corpus = Corpus::from_raw(vec![
        raw("a", "Cats and Dogs", "pets animals", "PetCo", (100, 10, 1, 2)),
        raw("b", "Dogs Playing", "pets dogs", "PetCo", (50, 5, 0, 1)),
        raw("c", "Cooking Pasta", "food", "ChefTV", (200, 20, 2, 5)),
    ])
    .unwrap();
    Engine::new(corpus, EngineConfig::default()).unwrap()
}

fn csv_engine() -> Engine {
    let data = format!(
        "{HEADER}\n\
         v1,Funny cat compilation,cats|funny|pets,Cats doing things,PetChannel,15,US,1000,100,5,20,http://t/1,2018-01-01\n\
         v2,Cute cat video,cats|cute|pets,More cats,PetChannel,15,GB,500,60,1,10,http://t/2,2018-01-02\n\
         v3,Football highlights,football|sports,Goals,SportsNet,17,US,5000,300,20,80,http://t/3,2018-01-03\n\
         v4,Football analysis,football|tactics|sports,Tactics,SportsNet,17,CA,800,40,2,15,http://t/4,2018-01-04\n\
         v5,Music video official,music|pop,Song,MusicCo,10,US,90000,4000,100,900,http://t/5,2018-01-05\n\
         v6,Music live session,music|live,Live,MusicCo,0,IN,300,10,0,3,http://t/6,2018-01-06\n\
         v1,Duplicate row,dup,dup,Dup,1,US,1,1,1,1,,\n"
    );
    Engine::from_reader(data.as_bytes(), EngineConfig::default()).unwrap()
}

fn ids<'a>(records: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    records.collect()
}

#[test]
fn recommend_ranks_shared_vocabulary_first() {
    let engine = scenario_engine();
    let recs = engine.recommend(&AnchorSelector::ById("a".into()), 2);
    assert_eq!(ids(recs.iter().map(|r| r.record.id.as_str())), vec!["b", "c"]);
    assert!(recs[0].similarity_score > recs[1].similarity_score);
    assert_eq!(recs[0].popularity_score, recs[0].record.popularity_score);
}

#[test]
fn trending_without_filter_returns_most_popular() {
    let engine = scenario_engine();
    let top = engine.trending(&TrendingFilter::default(), 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].record.id, "c");
}

#[test]
fn search_matches_title_tags_or_channel() {
    let engine = scenario_engine();
    let hits = engine.search("dogs", 10).unwrap();
    let mut found = ids(hits.iter().map(|s| s.record.id.as_str()));
    found.sort();
    assert_eq!(found, vec!["a", "b"]);

    let by_channel = engine.search("cheftv", 10).unwrap();
    assert_eq!(ids(by_channel.iter().map(|s| s.record.id.as_str())), vec!["c"]);
}

#[test]
fn empty_search_is_invalid_query() {
    let engine = scenario_engine();
    assert!(matches!(engine.search("", 5), Err(EngineError::InvalidQuery(_))));
}

#[test]
fn recommend_never_returns_the_anchor() {
    let engine = csv_engine();
    for rec in engine.records() {
        let recs = engine.recommend(&AnchorSelector::ById(rec.id.clone()), 10);
        assert!(recs.iter().all(|r| r.record.id != rec.id));
        assert_eq!(recs.len(), engine.records().len() - 1);
        for pair in recs.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
    }
}

#[test]
fn duplicate_ids_keep_first_row() {
    let engine = csv_engine();
    assert_eq!(engine.records().len(), 6);
    assert_eq!(engine.corpus().get("v1").unwrap().title, "Funny cat compilation");
}

#[test]
fn recommend_by_title_uses_first_case_insensitive_match() {
    let engine = csv_engine();
    let by_title = engine.recommend(&AnchorSelector::ByTitle("FOOTBALL".into()), 1);
    assert_eq!(by_title[0].record.id, "v4");
    let by_id = engine.recommend(&AnchorSelector::ById("v3".into()), 1);
    assert_eq!(by_title, by_id);
}

#[test]
fn unresolved_anchor_and_zero_n_are_empty() {
    let engine = csv_engine();
    assert!(engine.recommend(&AnchorSelector::ById("nope".into()), 5).is_empty());
    assert!(engine.recommend(&AnchorSelector::ByTitle("no such title".into()), 5).is_empty());
    assert!(engine.recommend(&AnchorSelector::ByTitle(String::new()), 5).is_empty());
    assert!(engine.recommend(&AnchorSelector::ById("v1".into()), 0).is_empty());
    assert!(engine.trending(&TrendingFilter::default(), 0).is_empty());
}

#[test]
fn identical_text_ties_break_by_corpus_order() {
    let corpus = Corpus::from_raw(vec![
        raw("x", "Pasta night", "food", "Chef", (1, 0, 0, 0)),
        raw("y", "Pasta recipe", "food", "Chef", (1, 0, 0, 0)),
        raw("z", "Pasta recipe", "food", "Chef", (1, 0, 0, 0)),
        raw("w", "Pasta recipe", "food", "Chef", (1, 0, 0, 0)),
    ])
    .unwrap();
    let engine = Engine::new(corpus, EngineConfig::default()).unwrap();
    let recs = engine.recommend(&AnchorSelector::ById("z".into()), 3);
    assert_eq!(ids(recs.iter().map(|r| r.record.id.as_str())), vec!["y", "w", "x"]);
    assert!((recs[0].similarity_score - 1.0).abs() < 1e-12);
    assert!(recs.iter().all(|r| (0.0..=1.0).contains(&r.similarity_score)));
}

#[test]
fn similarity_scores_stay_within_unit_range() {
    let engine = csv_engine();
    for id in ["v1", "v2", "v3", "v4", "v5", "v6"] {
        let recs = engine.recommend(&AnchorSelector::ById(id.into()), 10);
        assert!(recs.iter().all(|r| (0.0..=1.0).contains(&r.similarity_score)), "{id}");
    }
    let recs = engine.recommend_for_text("cats pets music", 10).unwrap();
    assert!(recs.iter().all(|r| (0.0..=1.0).contains(&r.similarity_score)));
}

#[test]
fn empty_id_does_not_resolve_to_an_id_less_row() {
    let corpus = Corpus::from_raw(vec![
        raw("a", "Dogs at play", "pets", "PetCo", (1, 0, 0, 0)),
        RawRecord {
            title: Some("Dogs at rest".into()),
            tags: Some("pets".into()),
            ..Default::default()
        },
        raw("b", "Dogs in water", "pets", "PetCo", (1, 0, 0, 0)),
    ])
    .unwrap();
    let engine = Engine::new(corpus, EngineConfig::default()).unwrap();
    assert!(engine.recommend(&AnchorSelector::ById(String::new()), 5).is_empty());
    assert_eq!(engine.recommend(&AnchorSelector::ById("a".into()), 5).len(), 2);
}

#[test]
fn trending_filters_by_country_and_category() {
    let engine = csv_engine();
    let us = engine.trending(&TrendingFilter::new().with_country("US"), 10);
    assert_eq!(ids(us.iter().map(|s| s.record.id.as_str())), vec!["v5", "v3", "v1"]);
    assert!(us.iter().all(|s| s.record.country == "US"));

    let sports_us = engine.trending(&TrendingFilter::new().with_country("US").with_category(17), 10);
    assert_eq!(ids(sports_us.iter().map(|s| s.record.id.as_str())), vec!["v3"]);

    let zero = engine.trending(&TrendingFilter::new().with_category(0), 10);
    assert_eq!(ids(zero.iter().map(|s| s.record.id.as_str())), vec!["v6"]);

    assert!(engine.trending(&TrendingFilter::new().with_country("FR"), 10).is_empty());
    assert_eq!(engine.trending(&TrendingFilter::default(), 100).len(), 6);
}

#[test]
fn invalid_category_cells_never_match_category_zero() {
    let data = format!(
        "{HEADER}\n\
         a,Dogs one,pets,,PetCo,0,US,10,1,0,0,,\n\
         b,Dogs two,pets,,PetCo,-5,US,20,1,0,0,,\n\
         c,Dogs three,pets,,PetCo,abc,US,30,1,0,0,,\n\
         d,Dogs four,pets,,PetCo,,US,40,1,0,0,,\n"
    );
    let engine = Engine::from_reader(data.as_bytes(), EngineConfig::default()).unwrap();
    let zero = engine.trending(&TrendingFilter::new().with_category(0), 10);
    assert_eq!(ids(zero.iter().map(|s| s.record.id.as_str())), vec!["a"]);
    assert_eq!(engine.trending(&TrendingFilter::default(), 10).len(), 4);
}

#[test]
fn search_is_literal_and_ranked_by_popularity() {
    let engine = csv_engine();
    let hits = engine.search("CAT", 10).unwrap();
    assert_eq!(ids(hits.iter().map(|s| s.record.id.as_str())), vec!["v1", "v2"]);
    assert!(engine.search("c.t", 10).unwrap().is_empty());
    assert_eq!(engine.search("music", 1).unwrap()[0].record.id, "v5");
}

#[test]
fn text_query_projects_into_the_space() {
    let engine = csv_engine();
    // "pop" is outside the vocabulary; the shorter music row is closest
    let recs = engine.recommend_for_text("music pop", 2).unwrap();
    assert_eq!(ids(recs.iter().map(|r| r.record.id.as_str())), vec!["v6", "v5"]);
    assert!(engine.recommend_for_text("zzzz qqqq", 5).unwrap().is_empty());
    assert!(matches!(engine.recommend_for_text("   ", 5), Err(EngineError::InvalidQuery(_))));
}

#[test]
fn queries_are_idempotent() {
    let engine = csv_engine();
    let first: Vec<_> = engine.recommend(&AnchorSelector::ById("v2".into()), 4).iter().map(|r| r.view()).collect();
    let second: Vec<_> = engine.recommend(&AnchorSelector::ById("v2".into()), 4).iter().map(|r| r.view()).collect();
    assert_eq!(first, second);
    let a: Vec<_> = engine.search("s", 10).unwrap().iter().map(|s| s.view()).collect();
    let b: Vec<_> = engine.search("s", 10).unwrap().iter().map(|s| s.view()).collect();
    assert_eq!(a, b);
}

#[test]
fn stats_aggregate_the_corpus() {
    let engine = csv_engine();
    let stats = engine.stats();
    assert_eq!(stats.total_videos, 6);
    assert_eq!(stats.total_views, 1000 + 500 + 5000 + 800 + 90000 + 300);
    assert_eq!(stats.total_likes, 100 + 60 + 300 + 40 + 4000 + 10);
    assert_eq!(stats.total_comments, 20 + 10 + 80 + 15 + 900 + 3);
    assert_eq!(stats.countries.get_index(0), Some((&"US".to_string(), &3)));
    assert_eq!(stats.countries.len(), 4);
    let categories: Vec<(i64, usize)> = stats.categories.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(categories, vec![(15, 2), (17, 2), (0, 1), (10, 1)]);

}

#[test]
fn loads_from_file_and_reports_missing_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    writeln!(file, "a,Dogs one,pets,,PetCo,1,US,1,1,0,0,,").unwrap();
    writeln!(file, "b,Dogs two,pets,,PetCo,1,US,2,1,0,0,,").unwrap();
    let engine = Engine::from_path(file.path(), EngineConfig::default()).unwrap();
    assert_eq!(engine.records().len(), 2);

    let err = Engine::from_path("/definitely/not/here.csv", EngineConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::Io(_)));
}

#[test]
fn corpus_without_shared_terms_fails_to_build() {
    let corpus = Corpus::from_raw(vec![
        raw("a", "alpha", "", "", (0, 0, 0, 0)),
        raw("b", "beta", "", "", (0, 0, 0, 0)),
    ])
    .unwrap();
    assert!(matches!(Engine::new(corpus, EngineConfig::default()), Err(EngineError::Data(_))));
    assert!(matches!(Corpus::from_raw(Vec::new()), Err(EngineError::Data(_))));
}

#[test]
fn handle_swaps_engines_without_disturbing_readers() {
    let handle = EngineHandle::new(scenario_engine());
    let before = handle.current();
    assert_eq!(before.records().len(), 3);

    let previous = handle.replace(csv_engine());
    assert_eq!(previous.records().len(), 3);
    assert_eq!(before.records().len(), 3);
    assert_eq!(handle.current().records().len(), 6);

    assert!(handle.reload_from_path("/definitely/not/here.csv").is_err());
    assert_eq!(handle.current().records().len(), 6);
}
