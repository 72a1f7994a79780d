//! Markdown preview of a prompt, rendered from its structured blocks.

use unicode_segmentation::UnicodeSegmentation;

use crate::{ProfileBlock, Prompt, prompt::EMPTY_PROFILES_NOTICE};

const SECTION_HEADING: &str = "### Retrieved Artist Profiles";

/// Renders `prompt` for display. Field values are reformatted, never rewritten: long prose
/// fields are word-wrapped at `wrap_width` graphemes.
pub fn render_preview(prompt: &Prompt, wrap_width: usize) -> String {
	let mut out = String::new();

	out.push_str("**Question:** ");
	out.push_str(prompt.query());
	out.push_str("\n\n---\n");
	out.push_str(SECTION_HEADING);
	out.push_str("\n\n");

	if prompt.blocks().is_empty() {
		out.push('_');
		out.push_str(EMPTY_PROFILES_NOTICE);
		out.push_str("_\n");

		return out;
	}

	let sections: Vec<String> =
		prompt.blocks().iter().map(|block| render_block(block, wrap_width)).collect();

	out.push_str(&sections.join("\n---\n\n"));

	out
}

fn render_block(block: &ProfileBlock, wrap_width: usize) -> String {
	// Two trailing spaces force a Markdown line break.
	format!(
		"**Name: {}**  \nGenre: {}  \nLocation: {}  \n*Nonprofit Interests: {}*  \n{}\n\n{}\n",
		block.name,
		block.genre,
		block.location,
		block.nonprofit_interests,
		wrap(&format!("Bio: {}", block.bio), wrap_width),
		wrap(&format!("Passion Statement: {}", block.passion_statement), wrap_width),
	)
}

/// Greedy word wrap. Words wider than `width` occupy a line of their own.
fn wrap(text: &str, width: usize) -> String {
	let width = width.max(1);
	let mut lines = Vec::new();
	let mut line = String::new();
	let mut line_width = 0;

	for word in text.split_whitespace() {
		let word_width = word.graphemes(true).count();

		if line_width > 0 && line_width + 1 + word_width > width {
			lines.push(std::mem::take(&mut line));

			line_width = 0;
		}
		if line_width > 0 {
			line.push(' ');

			line_width += 1;
		}

		line.push_str(word);

		line_width += word_width;
	}

	if !line.is_empty() {
		lines.push(line);
	}

	lines.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Profile, RankedProfile, RetrievalResult, build_prompt};

	fn results(bio: &str) -> RetrievalResult {
		RetrievalResult::new(vec![RankedProfile {
			profile: Profile {
				name: "Alex Rivers".to_string(),
				genre: "Folk".to_string(),
				location: "Austin".to_string(),
				nonprofit_interests: Some(vec!["Rivers".to_string()]),
				passion_statement: "Supports river cleanup.".to_string(),
				bio: bio.to_string(),
				social_links: None,
			},
			distance: 0.25,
		}])
		.expect("valid ranking rejected")
	}

	#[test]
	fn wrap_respects_width_and_keeps_words() {
		let wrapped = wrap("one two three four five", 9);

		assert_eq!(wrapped, "one two\nthree\nfour five");
	}

	#[test]
	fn wrap_counts_graphemes_not_bytes() {
		let wrapped = wrap("café café", 9);

		assert_eq!(wrapped, "café café");
	}

	#[test]
	fn highlights_fields_without_changing_them() {
		let bio = "A long-time songwriter who has spent two decades playing river towns across Texas and organizing benefit shows.";
		let prompt = build_prompt("environmental conservation", &results(bio));
		let preview = render_preview(&prompt, 40);

		assert!(preview.starts_with("**Question:** environmental conservation"));
		assert!(preview.contains("**Name: Alex Rivers**"));
		assert!(preview.contains("*Nonprofit Interests: Rivers*"));
		assert!(preview.lines().all(|line| line.graphemes(true).count() <= 40 || !line.contains(' ')));
		assert!(preview.replace('\n', " ").contains(&format!("Bio: {bio}")));
	}

	#[test]
	fn zero_results_render_notice() {
		let prompt = build_prompt("anything", &RetrievalResult::empty());
		let preview = render_preview(&prompt, 100);

		assert!(preview.contains(SECTION_HEADING));
		assert!(preview.contains(EMPTY_PROFILES_NOTICE));
		assert!(!preview.contains("Name:"));
	}
}
