//! Integration tests for line parsing over a Twitch sample corpus.
//!
//! These verify that parsed fields, reformatted back into the canonical
//! grammar, reparse to an equal record, and that the structural invariants
//! of the grammar hold across the corpus.

use twirc_core::message::LineRef;

/// Lines captured from a real Twitch chat session (tokens redacted).
const CORPUS: &[&str] = &[
    ":tmi.twitch.tv 001 realeris :Welcome, GLHF!",
    ":tmi.twitch.tv 372 realeris :You are in a maze of twisty passages, all alike.",
    ":tmi.twitch.tv 375 realeris :-",
    ":tmi.twitch.tv 376 realeris :>",
    "PING :tmi.twitch.tv",
    ":tmi.twitch.tv CAP * ACK :twitch.tv/tags twitch.tv/commands twitch.tv/membership",
    ":realeris!realeris@realeris.tmi.twitch.tv JOIN #realeris",
    ":realeris!realeris@realeris.tmi.twitch.tv PART #realeris",
    "@badge-info=subscriber/1;badges=broadcaster/1,subscriber/0;mod=0;user-type= :r!r@r.tmi.twitch.tv PRIVMSG #r :Heya",
    "@emote-only=0;followers-only=-1;r9k=0;slow=0;subs-only=0 :tmi.twitch.tv ROOMSTATE #realeris",
    "@badges=moderator/1;color=#FF0000;display-name=SomeMod :tmi.twitch.tv USERSTATE #realeris",
    "@color=#8A2BE2;display-name=Realeris;emote-sets=0 :tmi.twitch.tv GLOBALUSERSTATE",
    "@msg-id=resub;msg-param-months=6;system-msg=Six\\smonths! :tmi.twitch.tv USERNOTICE #r :Pog",
    "@ban-duration=600 :tmi.twitch.tv CLEARCHAT #r :baduser",
    ":tmi.twitch.tv NOTICE #r :This room is now in slow mode.",
    ":tmi.twitch.tv RECONNECT",
];

/// Reassemble a parsed record into the canonical grammar.
fn reformat(line: &LineRef<'_>) -> String {
    let mut s = String::new();
    if let Some(tags) = &line.tags {
        s.push('@');
        for (i, (key, value)) in tags.iter().enumerate() {
            if i > 0 {
                s.push(';');
            }
            s.push_str(key);
            s.push('=');
            s.push_str(value);
        }
        s.push(' ');
    }
    if let Some(prefix) = line.prefix {
        s.push(':');
        s.push_str(prefix);
        s.push(' ');
    }
    s.push_str(line.command);
    if let Some(channel) = line.channel {
        s.push(' ');
        s.push_str(channel);
    }
    if let Some(trailing) = line.trailing {
        s.push_str(" :");
        s.push_str(trailing);
    }
    s
}

#[test]
fn test_corpus_parses() {
    for raw in CORPUS {
        let line = LineRef::parse(raw).unwrap_or_else(|e| panic!("{}: {}", raw, e));
        assert!(!line.command.is_empty(), "empty command for {}", raw);
    }
}

#[test]
fn test_corpus_round_trip() {
    for raw in CORPUS {
        let line = LineRef::parse(raw).unwrap();
        let reformatted = reformat(&line);
        let reparsed = LineRef::parse(&reformatted)
            .unwrap_or_else(|e| panic!("reformatted {:?} failed: {}", reformatted, e));
        assert_eq!(line, reparsed, "round trip diverged for {}", raw);
    }
}

#[test]
fn test_corpus_parse_is_idempotent() {
    for raw in CORPUS {
        assert_eq!(LineRef::parse(raw).unwrap(), LineRef::parse(raw).unwrap());
    }
}

#[test]
fn test_tags_present_iff_at_sign() {
    for raw in CORPUS {
        let line = LineRef::parse(raw).unwrap();
        assert_eq!(line.tags.is_some(), raw.starts_with('@'), "for {}", raw);
    }
}

#[test]
fn test_prefix_present_iff_colon_after_tags() {
    for raw in CORPUS.iter().copied() {
        let line = LineRef::parse(raw).unwrap();
        let post_tags = match raw.strip_prefix('@') {
            Some(rest) => rest.split_once(' ').map(|(_, r)| r.trim_start_matches(' ')).unwrap(),
            None => raw,
        };
        assert_eq!(line.prefix.is_some(), post_tags.starts_with(':'), "for {}", raw);
    }
}

#[test]
fn test_semicolon_count_matches_tag_count() {
    for raw in CORPUS.iter().filter(|raw| raw.starts_with('@')) {
        let section = &raw[1..raw.find(' ').unwrap()];
        // Only meaningful when every pair is in key=value form.
        if section.split(';').any(|pair| !pair.contains('=')) {
            continue;
        }
        let separators = section.matches(';').count();
        let line = LineRef::parse(raw).unwrap();
        assert_eq!(
            separators,
            line.tags.unwrap().len() - 1,
            "separator count for {}",
            raw
        );
    }
}

#[test]
fn test_tag_escapes_pass_through_raw() {
    let line = LineRef::parse(
        "@msg-id=resub;system-msg=Six\\smonths! :tmi.twitch.tv USERNOTICE #r :Pog",
    )
    .unwrap();
    assert_eq!(line.tags.unwrap()["system-msg"], "Six\\smonths!");
}
