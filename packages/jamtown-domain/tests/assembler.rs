use jamtown_domain::{
	Profile, RankedProfile, RetrievalResult, build_prompt, render_preview, result_cards,
};

fn alex_rivers(distance: f32) -> RankedProfile {
	RankedProfile {
		profile: Profile {
			name: "Alex Rivers".to_string(),
			genre: "Folk".to_string(),
			location: "Austin".to_string(),
			nonprofit_interests: Some(vec!["River cleanup".to_string()]),
			passion_statement: "Supports river cleanup.".to_string(),
			bio: "Alex Rivers writes songs about the Colorado River.".to_string(),
			social_links: Some("https://example.com/alex".to_string()),
		},
		distance,
	}
}

#[test]
fn single_profile_prompt_has_exactly_one_block() {
	let results = RetrievalResult::new(vec![alex_rivers(0.42)]).expect("valid ranking rejected");
	let prompt = build_prompt("environmental conservation", &results);
	let name_lines: Vec<&str> =
		prompt.text().lines().filter(|line| line.starts_with("Name:")).collect();

	assert_eq!(name_lines, vec!["Name: Alex Rivers"]);
	assert_eq!(prompt.blocks().len(), 1);
	assert!(prompt.text().contains("environmental conservation"));
}

#[test]
fn empty_prompt_has_query_and_unrelated_framing_only() {
	let prompt = build_prompt("support for music education", &RetrievalResult::empty());

	assert!(prompt.text().contains("support for music education"));
	assert!(prompt.text().contains("unrelated to the artists' interests"));
	assert!(!prompt.text().contains("Name:"));
	assert!(!prompt.text().contains("---"));
}

#[test]
fn preview_and_prompt_share_the_same_fields() {
	let results = RetrievalResult::new(vec![alex_rivers(0.42)]).expect("valid ranking rejected");
	let prompt = build_prompt("environmental conservation", &results);
	let preview = render_preview(&prompt, 100);

	for block in prompt.blocks() {
		assert!(preview.contains(&block.name));
		assert!(preview.contains(&block.genre));
		assert!(preview.contains(&block.location));
		assert!(preview.contains(&block.bio));
		assert!(preview.contains(&block.passion_statement));
	}
}

#[test]
fn cards_follow_rank_order() {
	let mut second = alex_rivers(0.5);

	second.profile.name = "Bea Stone".to_string();
	second.profile.social_links = Some("  ".to_string());

	let results =
		RetrievalResult::new(vec![alex_rivers(0.42), second]).expect("valid ranking rejected");
	let cards = result_cards(&results);

	assert_eq!(cards.len(), 2);
	assert_eq!(cards[0].rank, 1);
	assert_eq!(cards[0].title(), "1. Alex Rivers (Folk, Austin), distance 0.420");
	assert_eq!(cards[1].name, "Bea Stone");
	assert_eq!(cards[1].social_links, None);
	assert_eq!(
		serde_json::to_value(&cards[0]).expect("serialize failed")["nonprofit_interests"],
		serde_json::json!(["River cleanup"])
	);
}
