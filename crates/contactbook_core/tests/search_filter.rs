use contactbook_core::{
    compare_order, compile, parse, sort_contacts, Contact, ContactFilter, FieldTag, ParsedQuery,
    SearchConfig, SortOrder,
};

fn contact(name: &str, email: &str, numbers: &[&str], is_favourite: bool) -> Contact {
    let mut contact = Contact::new();
    contact.name = name.to_string();
    contact.email = email.to_string();
    contact.is_favourite = is_favourite;
    for number in numbers {
        contact.add_phone_number(*number, "Mobile");
    }
    contact
}

fn fixtures() -> Vec<Contact> {
    vec![
        contact("Alice Smith", "alice@Example.com", &["555-0101"], true),
        contact("bob jones", "bob@work.org", &["0700 123", "0800 777"], false),
        contact("Carol", "carol@example.com", &[], true),
        contact("Dave Alison", "dave@home.net", &["999"], false),
    ]
}

fn matching_names(query: &str, favourites_only: bool) -> Vec<String> {
    let predicate = compile(&parse(query), favourites_only);
    fixtures()
        .into_iter()
        .filter(|contact| predicate.matches(contact))
        .map(|contact| contact.name)
        .collect()
}

#[test]
fn empty_query_matches_everything() {
    assert_eq!(parse(""), ParsedQuery::default());
    assert_eq!(matching_names("", false).len(), 4);
    assert_eq!(matching_names("   ", false).len(), 4);
}

#[test]
fn favourites_with_empty_query_selects_exactly_favourites() {
    assert_eq!(matching_names("", true), vec!["Alice Smith", "Carol"]);
}

#[test]
fn untagged_text_matches_name_case_insensitively() {
    assert_eq!(matching_names("ALI", false), vec!["Alice Smith", "Dave Alison"]);
    assert_eq!(matching_names("  jones ", false), vec!["bob jones"]);
    assert!(matching_names("example", false).is_empty());
}

#[test]
fn favourites_are_and_combined_with_text() {
    assert_eq!(matching_names("ali", true), vec!["Alice Smith"]);
    assert!(matching_names("email:work", true).is_empty());
    assert_eq!(matching_names("email:example", true), vec!["Alice Smith", "Carol"]);
}

#[test]
fn email_tag_matches_email_substring() {
    assert_eq!(
        parse("Email: EXAMPLE"),
        ParsedQuery::Tagged {
            field: FieldTag::Email,
            value: "EXAMPLE".to_string(),
        }
    );
    assert_eq!(matching_names("email:EXAMPLE", false), vec!["Alice Smith", "Carol"]);

    for fixture in fixtures() {
        let predicate = compile(&parse("email:o"), false);
        assert_eq!(
            predicate.matches(&fixture),
            fixture.email.to_lowercase().contains('o')
        );
    }
}

#[test]
fn number_tag_matches_any_phone_number() {
    assert_eq!(matching_names("number:7", false), vec!["bob jones"]);
    assert_eq!(matching_names("NUMBER: 555", false), vec!["Alice Smith"]);
    assert_eq!(matching_names("number:0800 7", false), vec!["bob jones"]);
}

#[test]
fn number_tag_with_empty_value_requires_some_phone_number() {
    assert_eq!(
        matching_names("number:", false),
        vec!["Alice Smith", "bob jones", "Dave Alison"]
    );
}

#[test]
fn name_tag_with_empty_value_matches_everything() {
    assert_eq!(matching_names("name:", false).len(), 4);
    assert_eq!(matching_names("name:  bOB", false), vec!["bob jones"]);
}

#[test]
fn unrecognized_tag_searches_whole_text_in_name() {
    assert_eq!(
        parse("foo:bar"),
        ParsedQuery::Untagged {
            text: "foo:bar".to_string(),
        }
    );

    let mut tagged_looking = contact("Ref:Bar Ltd", "ref@bar.io", &[], false);
    let predicate = compile(&parse("ref:bar"), false);
    assert!(predicate.matches(&tagged_looking));
    tagged_looking.name = "Bar".to_string();
    assert!(!predicate.matches(&tagged_looking));
}

#[test]
fn predicate_is_reusable_and_sendable() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let predicate = compile(&parse("name:a"), false);
    assert_send_sync(&predicate);

    let people = fixtures();
    let first = people.iter().filter(|c| predicate.matches(c)).count();
    let second = people.iter().filter(|c| predicate.matches(c)).count();
    assert_eq!(first, second);
    assert!(people.iter().any(predicate.as_fn()));
}

#[test]
fn ascending_sort_is_case_sensitive_and_stable() {
    let mut people = vec![
        contact("Bob", "first@x", &[], false),
        contact("alice", "a@x", &[], false),
        contact("Bob", "second@x", &[], false),
    ];
    sort_contacts(&mut people, SortOrder::Ascending);

    let order = people
        .iter()
        .map(|c| (c.name.as_str(), c.email.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![("Bob", "first@x"), ("Bob", "second@x"), ("alice", "a@x")]
    );
}

#[test]
fn descending_sort_reverses_names_but_keeps_ties_stable() {
    let mut people = vec![
        contact("Bob", "first@x", &[], false),
        contact("alice", "a@x", &[], false),
        contact("Bob", "second@x", &[], false),
        contact("Zed", "z@x", &[], false),
    ];
    sort_contacts(&mut people, SortOrder::Descending);

    let order = people.iter().map(|c| c.email.as_str()).collect::<Vec<_>>();
    assert_eq!(order, vec!["a@x", "z@x", "first@x", "second@x"]);

    let compare = compare_order(SortOrder::Descending);
    assert!(compare(&people[0], &people[1]).is_lt());
}

#[test]
fn search_config_drives_predicate_and_order() {
    let mut config = SearchConfig::default();
    assert_eq!(config.filter, ContactFilter::All);
    assert_eq!(config.sort, SortOrder::Ascending);
    assert!(config.predicate().is_match_all());

    config.set_query("name:carol");
    config.toggle_favourites();
    assert!(config.favourites_only());
    let predicate = config.predicate();
    let selected = fixtures()
        .into_iter()
        .filter(|c| predicate.matches(c))
        .map(|c| c.name)
        .collect::<Vec<_>>();
    assert_eq!(selected, vec!["Carol"]);

    config.flip_sort();
    assert_eq!(config.sort, SortOrder::Descending);
    let mut people = fixtures();
    people.sort_by(config.comparator());
    assert_eq!(people[0].name, "bob jones");

    config.toggle_favourites();
    config.flip_sort();
    assert_eq!(config, SearchConfig::with_query("name:carol"));
}
