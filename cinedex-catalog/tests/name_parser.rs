use cinedex_catalog::{ExtractError, NumeralResolver, PathParser, PathSignature, TitleKind};
use cinedex_catalog::name_parser::extract_movie_title;

// ── Movie titles ────────────────────────────────────────────────────────────

#[test]
fn year_is_stripped_before_han_title() {
    assert_eq!(extract_movie_title("标题2010"), "标题");
    assert_eq!(extract_movie_title("标题.2010.1080p"), "标题");
}

#[test]
fn empty_name_yields_empty_title() {
    assert_eq!(extract_movie_title(""), "");
}

#[test]
fn purely_numeric_name_keeps_a_digit_run() {
    let title = extract_movie_title("123456");
    assert!(!title.is_empty());
    assert!(title.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(title, "56");
}

#[test]
fn four_digit_name_falls_back_to_original_digits() {
    assert_eq!(extract_movie_title("1917"), "1917");
}

#[test]
fn trailing_one_is_dropped() {
    assert_eq!(extract_movie_title("2012"), "2012");
    assert_eq!(extract_movie_title("2011"), "201");
    assert_eq!(extract_movie_title("叶问1"), "叶问");
}

#[test]
fn parenthesized_text_is_removed() {
    assert_eq!(extract_movie_title("让子弹飞 (Let the Bullets Fly)"), "让子弹飞");
    assert_eq!(extract_movie_title("霸王别姬(1993)"), "霸王别姬");
}

#[test]
fn first_han_run_wins() {
    assert_eq!(extract_movie_title("流浪地球.The.Wandering.Earth.2019.国语"), "流浪地球");
}

#[test]
fn han_title_keeps_short_digit_runs() {
    assert_eq!(extract_movie_title("速度与激情7.2015.BluRay"), "速度与激情7");
}

#[test]
fn latin_only_name_is_returned_cleaned() {
    assert_eq!(extract_movie_title("Inception.2010"), "Inception.");
    assert_eq!(extract_movie_title("Heat (Director's Cut)"), "Heat");
}

// ── Season / episode ────────────────────────────────────────────────────────

#[test]
fn sxxeyy_marker() {
    let parser = PathParser::default();
    assert_eq!(parser.season_episode("/media/tv/Show/Show.S02E05.mkv").unwrap(), (2, 5));
    assert_eq!(parser.season_episode("/media/tv/Show/show.s1e1024.mkv").unwrap(), (1, 1024));
}

#[test]
fn marker_only_considers_file_name() {
    // S03 in the directory must not pair with the E in the file name
    let parser = PathParser::default();
    assert_eq!(parser.season_episode("/media/tv/Show/S03/E07.mkv").unwrap(), (3, 7));
}

#[test]
fn localized_season_with_numbered_file() {
    let parser = PathParser::default();
    assert_eq!(parser.season_episode("/media/tv/青春/第三季/12.mp4").unwrap(), (3, 12));
}

#[test]
fn url_encoded_localized_season() {
    let parser = PathParser::default();
    let path = "/d/tv/Show/%E7%AC%AC%E4%BA%8C%E5%AD%A3/08.mkv";
    assert_eq!(parser.season_episode(path).unwrap(), (2, 8));
}

#[test]
fn specials_directory_is_season_zero() {
    let parser = PathParser::default();
    assert_eq!(parser.season_episode("/media/tv/Show/SP/03.mkv").unwrap(), (0, 3));
}

#[test]
fn missing_episode_digits_is_a_mismatch() {
    let parser = PathParser::default();
    let err = parser.season_episode("/media/tv/Show/第一季/finale.mkv").unwrap_err();
    assert!(matches!(err, ExtractError::PatternMismatch(_)));
}

#[test]
fn unknown_localized_season_fails() {
    let parser = PathParser::default();
    let err = parser.season_episode("/media/tv/Show/第十一季/01.mkv").unwrap_err();
    assert!(matches!(err, ExtractError::NumeralUnresolved(ref p) if p == "第十一季"));
}

#[test]
fn season_localized_phrase() {
    let parser = PathParser::default();
    assert_eq!(parser.season("/tv/Show/第三季/01.mkv").unwrap(), 3);
}

#[test]
fn season_s_marker() {
    let parser = PathParser::default();
    assert_eq!(parser.season("/tv/Show/S04/01.mkv").unwrap(), 4);
}

#[test]
fn season_specials_and_default() {
    let parser = PathParser::default();
    assert_eq!(parser.season("/tv/Show/SP/01.mkv").unwrap(), 0);
    assert_eq!(parser.season("/tv/Show/01.mkv").unwrap(), 1);
}

#[test]
fn season_decode_failure() {
    let parser = PathParser::default();
    let err = parser.season("/tv/Show/100%/01.mkv").unwrap_err();
    assert!(matches!(err, ExtractError::Decode(_)));
}

#[test]
fn season_phrase_table_is_injected() {
    let parser = PathParser::new(NumeralResolver::new([("第十一季", 11)]));
    assert_eq!(parser.season("/tv/Show/第十一季/01.mkv").unwrap(), 11);
    assert!(parser.season("/tv/Show/第一季/01.mkv").is_err());
}

// ── Signatures ──────────────────────────────────────────────────────────────

#[test]
fn movie_signature_uses_stem() {
    let parser = PathParser::default();
    let sig = parser.signature("/media/movies/霸王别姬.1993.mkv", TitleKind::Movie).unwrap();
    assert_eq!(sig, PathSignature::Title("霸王别姬".to_string()));
}

#[test]
fn tv_signature() {
    let parser = PathParser::default();
    let sig = parser.signature("/media/tv/Show/Show.S01E02.mkv", TitleKind::Tv).unwrap();
    assert_eq!(sig, PathSignature::SeasonEpisode { season: 1, episode: 2 });
}
