use pagedex_core::import::{
    BlockHint, FileStat, HeadingHint, Hints, ImportError, LinkHint, ListItemHint, MarkdownImport,
    TagHint,
};
use pagedex_core::literal::{Link, LinkKind, Literal};
use pagedex_core::page::{BlockKind, CodeStyle, ListItem, Page, ParentRef};
use pagedex_core::import_markdown;
use rstest::rstest;

fn heading(line: usize, text: &str, level: u8) -> HeadingHint {
    HeadingHint { line, heading: text.to_string(), level }
}

fn block(kind: &str, start: usize, end: usize) -> BlockHint {
    BlockHint { kind: kind.to_string(), line_start: start, line_end: end, id: None }
}

fn item(start: usize, end: usize, parent: i64, task: Option<char>) -> ListItemHint {
    ListItemHint { line_start: start, line_end: end, parent, task, id: None }
}

fn import(path: &str, contents: &str, hints: Hints) -> Page {
    let request = MarkdownImport {
        path: path.to_string(),
        contents: contents.to_string(),
        stat: FileStat {
            ctime: 1_700_000_000_000,
            mtime: 1_700_000_360_000,
            size: contents.len() as u64,
        },
        hints,
    };
    import_markdown(&request).expect("import should succeed")
}

fn outline(page: &Page) -> String {
    fn suffix(tags: &[String], fields: &[pagedex_core::metadata::InlineField]) -> String {
        let mut out = String::new();
        if !tags.is_empty() {
            out.push_str(&format!(" tags={}", tags.join(",")));
        }
        if !fields.is_empty() {
            let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
            out.push_str(&format!(" fields={}", keys.join(",")));
        }
        out
    }

    fn items(out: &mut Vec<String>, list: &[ListItem], depth: usize) {
        for item in list {
            let status = item.status.map(|c| format!(" [{c}]")).unwrap_or_default();
            out.push(format!(
                "{}item [{}, {}){}{}",
                "  ".repeat(depth),
                item.position.start,
                item.position.end,
                status,
                suffix(&item.metadata.tags, &item.metadata.fields)
            ));
            items(out, &item.children, depth + 1);
        }
    }

    let mut out = Vec::new();
    for section in &page.sections {
        out.push(format!(
            "section {} {:?} [{}, {}){}",
            section.ordinal,
            section.title,
            section.position.start,
            section.position.end,
            suffix(&section.metadata.tags, &section.metadata.fields)
        ));
        for block in &section.blocks {
            let kind = match &block.kind {
                BlockKind::List { .. } => "list".to_string(),
                BlockKind::Code { languages, .. } => format!("code[{}]", languages.join(",")),
                BlockKind::Data { .. } => "data".to_string(),
                BlockKind::Generic { kind } => kind.clone(),
            };
            out.push(format!(
                "  block {} {} [{}, {}){}",
                block.ordinal,
                kind,
                block.position.start,
                block.position.end,
                suffix(&block.metadata.tags, &block.metadata.fields)
            ));
            if let BlockKind::List { items: list } = &block.kind {
                items(&mut out, list, 2);
            }
        }
    }
    out.join("\n")
}

#[test]
fn fenced_code_under_single_heading() {
    let contents = "# Title\nSome text\nmore text\n```js\nlet x = 1;\n```";
    let hints = Hints {
        headings: vec![heading(0, "Title", 1)],
        blocks: vec![block("heading", 0, 0), block("paragraph", 1, 2), block("code", 3, 5)],
        ..Default::default()
    };

    let page = import("Title.md", contents, hints);

    assert_eq!(page.sections.len(), 1);
    let section = &page.sections[0];
    assert_eq!(section.level, 1);
    assert_eq!(section.ordinal, 1);

    let code: Vec<_> =
        section.blocks.iter().filter(|b| matches!(b.kind, BlockKind::Code { .. })).collect();
    assert_eq!(code.len(), 1);
    match &code[0].kind {
        BlockKind::Code { languages, style, content } => {
            assert_eq!(languages, &vec!["js".to_string()]);
            assert_eq!(*style, CodeStyle::Fenced);
            assert_eq!((content.start, content.end), (4, 5));
        }
        other => panic!("expected code block, got {other:?}"),
    }
}

#[test]
fn data_block_values_are_coerced() {
    let contents = "```yaml:data\na: 1\nb: two\n```";
    let hints = Hints { blocks: vec![block("code", 0, 3)], ..Default::default() };

    let page = import("data.md", contents, hints);

    let blocks: Vec<_> = page.blocks().collect();
    assert_eq!(blocks.len(), 1);
    let BlockKind::Data { data } = &blocks[0].kind else {
        panic!("expected data block, got {:?}", blocks[0].kind);
    };
    assert_eq!(data["a"].value.as_number(), Some(1.0));
    assert_eq!(data["b"].value, Literal::String("two".into()));
}

#[test]
fn malformed_data_block_aborts_import() {
    let contents = "# Broken\n```yaml:data\nkey: [unterminated\n```";
    let request = MarkdownImport {
        path: "broken.md".into(),
        contents: contents.into(),
        stat: FileStat::default(),
        hints: Hints {
            headings: vec![heading(0, "Broken", 1)],
            blocks: vec![block("code", 1, 3)],
            ..Default::default()
        },
    };

    let err = import_markdown(&request).unwrap_err();
    assert!(matches!(err, ImportError::DataBlock { line: 1, .. }), "got {err:?}");
}

#[test]
fn nested_task_under_task() {
    // The host encodes "list block at line 0" as -0, which is 0.
    let contents = "- [ ] parent\n  - [x] child";
    let hints = Hints {
        blocks: vec![block("list", 0, 1)],
        list_items: vec![item(0, 1, 0, Some(' ')), item(1, 1, 0, Some('x'))],
        ..Default::default()
    };

    let page = import("tasks.md", contents, hints);

    let BlockKind::List { items } = &page.sections[0].blocks[0].kind else {
        panic!("expected list block");
    };
    assert_eq!(items.len(), 1);
    let parent = &items[0];
    assert_eq!(parent.status, Some(' '));
    assert_eq!(parent.parent, ParentRef::Block(0));
    assert!(parent.is_task() && !parent.is_completed());

    assert_eq!(parent.children.len(), 1);
    let child = &parent.children[0];
    assert_eq!(child.status, Some('x'));
    assert_eq!(child.parent, ParentRef::Item(0));
    assert!(child.is_completed());
}

#[test]
fn inline_field_attaches_at_every_level() {
    let contents = "# Todo\n- fix bug\n  priority:: high\n- other";
    let hints = Hints {
        headings: vec![heading(0, "Todo", 1)],
        blocks: vec![block("heading", 0, 0), block("list", 1, 3)],
        list_items: vec![item(1, 2, -1, None), item(3, 3, -1, None)],
        ..Default::default()
    };

    let page = import("todo.md", contents, hints);
    let expected = Literal::String("high".into());

    let section = &page.sections[0];
    let block = &section.blocks[0];
    let BlockKind::List { items } = &block.kind else { panic!("expected list block") };

    assert_eq!(items[0].metadata.field("priority").unwrap().value, expected);
    assert!(items[1].metadata.fields.is_empty());
    assert_eq!(block.metadata.field("priority").unwrap().value, expected);
    assert_eq!(section.metadata.field("priority").unwrap().value, expected);
    assert_eq!(page.metadata.field("priority").unwrap().value, expected);
    assert_eq!(page.metadata.field("priority").unwrap().line, 2);
}

#[test]
fn host_link_attaches_to_nested_item_and_its_ancestors() {
    let contents = "# Links\n- parent\n  - child see [[Target|t]]\n- sibling";
    let hints = Hints {
        headings: vec![heading(0, "Links", 1)],
        blocks: vec![block("heading", 0, 0), block("list", 1, 3)],
        list_items: vec![item(1, 2, -1, None), item(2, 2, 1, None), item(3, 3, -1, None)],
        links: vec![LinkHint { link: "Target".into(), line: 2, display: Some("t".into()) }],
        ..Default::default()
    };

    let page = import("links.md", contents, hints);
    let expected = Link {
        path: "Target".into(),
        display: Some("t".into()),
        subpath: None,
        kind: LinkKind::File,
        embed: false,
    };

    let section = &page.sections[0];
    let block = &section.blocks[0];
    let BlockKind::List { items } = &block.kind else { panic!("expected list block") };
    let (parent, sibling) = (&items[0], &items[1]);
    let child = &parent.children[0];

    assert_eq!(child.metadata.links, vec![expected.clone()]);
    assert_eq!(block.metadata.links, vec![expected.clone()]);
    assert_eq!(section.metadata.links, vec![expected.clone()]);
    assert_eq!(page.metadata.links, vec![expected]);

    assert!(sibling.metadata.links.is_empty());
    // Only the innermost item starting at or before the line is considered.
    assert!(parent.metadata.links.is_empty());
}

#[test]
fn outline_of_mixed_document() {
    let contents = "intro line #draft\n# Plan\nstatus:: active\n- [ ] write\n  - [x] outline\n```rust\nfn main() {}\n```\n";
    let hints = Hints {
        headings: vec![heading(1, "Plan", 1)],
        blocks: vec![
            block("paragraph", 0, 0),
            block("heading", 1, 1),
            block("paragraph", 2, 2),
            block("list", 3, 4),
            block("code", 5, 7),
        ],
        list_items: vec![item(3, 4, -3, Some(' ')), item(4, 4, 3, Some('x'))],
        tags: vec![TagHint { tag: "draft".into(), line: 0 }],
        ..Default::default()
    };

    let page = import("notes/plan.md", contents, hints);

    insta::assert_snapshot!(outline(&page), @r#"
section 0 "plan" [0, 1) tags=#draft
  block 1 paragraph [0, 1) tags=#draft
section 1 "Plan" [1, 9) fields=status
  block 2 paragraph [2, 3) fields=status
  block 3 list [3, 5)
    item [3, 5) [ ]
      item [4, 5) [x]
  block 4 code[rust] [5, 8)
"#);
    assert!(page.metadata.has_tag("#draft"));
    assert_eq!(page.lines, 9);
    assert_eq!(page.extension, "md");
}

#[test]
fn file_stats_and_day_are_carried() {
    let page = import("journal/2024-01-15.md", "went hiking", Hints::default());

    assert_eq!(page.size, 11);
    assert_eq!(page.ctime.timestamp(), 1_700_000_000);
    assert_eq!(page.mtime.timestamp(), 1_700_000_360);
    assert_eq!(page.day.unwrap().date_naive().to_string(), "2024-01-15");
}

#[test]
fn frontmatter_is_coerced_and_links_stay_on_page() {
    let frontmatter: serde_yaml::Value =
        serde_yaml::from_str("Due Date: 2024-03-01\nestimate: 2 hours\nparent: \"[[Roadmap]]\"")
            .unwrap();
    let hints = Hints {
        headings: vec![heading(0, "Work", 2)],
        frontmatter: Some(frontmatter),
        frontmatter_links: vec![pagedex_core::import::FrontmatterLinkHint {
            key: Some("parent".into()),
            link: "Roadmap".into(),
            display: None,
        }],
        ..Default::default()
    };

    let page = import("work.md", "## Work\nbody", hints);

    let fm = page.frontmatter.as_ref().unwrap();
    assert_eq!(fm["due-date"].key, "Due Date");
    assert!(matches!(fm["due-date"].value, Literal::Date(_)));
    assert!(matches!(fm["estimate"].value, Literal::Duration(_)));
    assert_eq!(fm["parent"].value.as_link().unwrap().path, "Roadmap");
    assert!(page.day.is_none());

    assert_eq!(page.metadata.links.len(), 1);
    assert!(page.sections[0].metadata.links.is_empty());
}

#[rstest]
#[case::headings_from_top("# A\none\n## B\ntwo\n# C\n", vec![0, 2, 4])]
#[case::content_before_heading("preface\n\n# A\nbody\n", vec![2])]
#[case::no_headings("just\nsome\ntext", vec![])]
#[case::heading_on_last_line("text\n# End", vec![1])]
fn sections_partition_the_file(#[case] contents: &str, #[case] heading_lines: Vec<usize>) {
    let hints = Hints {
        headings: heading_lines.iter().map(|&l| heading(l, "H", 1)).collect(),
        ..Default::default()
    };
    let page = import("p.md", contents, hints);

    for line in 0..page.lines {
        let owners = page.sections.iter().filter(|s| s.position.contains(line)).count();
        assert_eq!(owners, 1, "line {line} is owned by {owners} sections");
        let section = page.section_at(line).expect("every line has a section");
        assert!(section.position.contains(line));
    }

    let ordinals: Vec<_> = page.sections.iter().map(|s| s.ordinal).collect();
    assert!(ordinals.windows(2).all(|w| w[0] < w[1]), "ordinals {ordinals:?}");
}

#[rstest]
#[case::empty("")]
#[case::whitespace("  \n\t\n   ")]
fn blank_document_has_no_sections(#[case] contents: &str) {
    let page = import("blank.md", contents, Hints::default());
    assert!(page.sections.is_empty());
}

#[test]
fn headingless_document_is_one_implicit_section() {
    let page = import("dir/My Note.md", "first\nsecond\n", Hints::default());

    assert_eq!(page.sections.len(), 1);
    let section = &page.sections[0];
    assert!(section.is_implicit());
    assert_eq!(section.title, "My Note");
    assert_eq!(section.level, 1);
    assert_eq!((section.position.start, section.position.end), (0, 3));
}

#[test]
fn block_ordinals_run_across_sections() {
    let contents = "# A\np1\np2\n# B\np3\n# C\np4";
    let hints = Hints {
        headings: vec![heading(0, "A", 1), heading(3, "B", 1), heading(5, "C", 1)],
        blocks: vec![
            block("paragraph", 6, 6),
            block("heading", 0, 0),
            block("paragraph", 1, 1),
            block("paragraph", 2, 2),
            block("heading", 3, 3),
            block("paragraph", 4, 4),
            block("heading", 5, 5),
        ],
        ..Default::default()
    };

    let page = import("o.md", contents, hints);

    let per_section: Vec<Vec<usize>> =
        page.sections.iter().map(|s| s.blocks.iter().map(|b| b.ordinal).collect()).collect();
    assert_eq!(per_section, vec![vec![1, 2], vec![3], vec![4]]);
}

#[test]
fn unknown_block_types_are_kept_verbatim() {
    let hints = Hints { blocks: vec![block("callout", 0, 1)], ..Default::default() };
    let page = import("c.md", "> [!note]\n> body", hints);

    let block = &page.sections[0].blocks[0];
    assert_eq!(block.kind, BlockKind::Generic { kind: "callout".into() });
}

/// Items whose parent cannot be resolved, and blocks before the first section,
/// are dropped without failing the import.
#[test]
fn unresolvable_nodes_are_dropped_silently() {
    let contents = "\n# List\n- a\n- b\n- c";
    let hints = Hints {
        headings: vec![heading(1, "List", 1)],
        blocks: vec![block("paragraph", 0, 0), block("list", 2, 4)],
        list_items: vec![
            item(2, 2, -2, None),
            // parent item does not exist
            item(3, 3, 40, None),
            // parent is not a list block
            item(4, 4, -1, None),
        ],
        ..Default::default()
    };

    let page = import("drop.md", contents, hints);

    assert_eq!(page.sections.len(), 1);
    let blocks: Vec<_> = page.blocks().collect();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].ordinal, 2);

    let lines: Vec<_> = page.list_items().iter().map(|i| i.position.start).collect();
    assert_eq!(lines, vec![2]);
}

#[test]
fn each_child_appears_once_under_its_parent() {
    let contents = "Tree\n- a\n  - b\n    - c\n  - d\n- e";
    let hints = Hints {
        blocks: vec![block("list", 1, 5)],
        // reported out of order, children before parents
        list_items: vec![
            item(3, 3, 2, None),
            item(4, 4, 1, None),
            item(2, 3, 1, None),
            item(5, 5, -1, None),
            item(1, 4, -1, None),
        ],
        ..Default::default()
    };

    let page = import("tree.md", contents, hints);

    let all = page.list_items();
    assert_eq!(all.len(), 5);
    for child in &all {
        let holders = all
            .iter()
            .filter(|p| p.children.iter().any(|c| c.position.start == child.position.start))
            .count();
        let expected = usize::from(matches!(child.parent, ParentRef::Item(_)));
        assert_eq!(holders, expected, "item on line {}", child.position.start);
    }

    let BlockKind::List { items } = &page.sections[0].blocks[0].kind else { panic!() };
    let roots: Vec<_> = items.iter().map(|i| i.position.start).collect();
    assert_eq!(roots, vec![5, 1]);
    let under_a: Vec<_> = items[1].children.iter().map(|i| i.position.start).collect();
    assert_eq!(under_a, vec![4, 2]);
}
