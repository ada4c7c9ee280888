pub mod builder;
pub mod document;
pub mod error;
pub mod forest;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod reconcile;
pub mod record;
pub mod session;
pub mod writer;

pub use builder::build;
pub use document::{Document, Entry, LineEnding, PARENT_KEY, Section, TYPE_KEY};
pub use error::{KeyError, ParseError, Result, SceneError};
pub use forest::{Forest, LinkRefusal};
pub use io::{load_document, load_scene, load_scene_with, save_document, save_node, save_node_with};
pub use parser::{BOM, Parser, parse_document};
pub use reconcile::reconcile;
pub use record::{NodeRecord, parse_records};
pub use session::{EditSession, EditedValues, NAME_PATH};
pub use writer::write_document;

#[cfg(test)]
mod tests {
    use super::*;
    use kennel_nodes::{NodeID, TypeRegistry, path};
    use kennel_structs::{Color, Vector2};
    use kennel_variant::{ResourceRef, Variant};

    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

    fn temp_test_dir() -> PathBuf {
        let seq = TEST_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        let pid = std::process::id();
        let dir = std::env::temp_dir().join(format!("kennel_scene_test_{pid}_{seq}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn reg() -> TypeRegistry {
        TypeRegistry::with_builtins()
    }

    fn load(reg: &TypeRegistry, src: &str) -> (Document, Forest) {
        let doc = parse_document(src).unwrap();
        let forest = build(&parse_records(&doc), reg);
        (doc, forest)
    }

    fn id(forest: &Forest, name: &str) -> NodeID {
        forest.id_of(name).unwrap()
    }

    /// Reconciles the edits of `name` and renders the result.
    fn save(
        reg: &TypeRegistry,
        doc: &Document,
        forest: &Forest,
        session: &EditSession,
        name: &str,
    ) -> String {
        let node = forest.by_name(name).unwrap();
        let edited = session.edited(node.id).cloned().unwrap_or_default();
        write_document(&reconcile(doc, reg, node, &edited).unwrap())
    }

    const SCENE: &str = "\
; main menu
[Root]
type = Node2D
Position = (10, 20)   ; centered later

[Logo]
type = Sprite
parent = Root
; the studio logo
Texture = Texture(\"Res/logo.png\")
FlipH = true

[Backdrop]
type = ColorRectangle
parent = Root
Theme/FillColor = (0,0,0,200)
";

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let cases: [(&str, usize); 7] = [
            ("[A]\ntype = Node\n[Broken\n", 3),
            ("[A]\n[ ]\n", 2),
            ("; header\nkey = 1\n", 2),
            ("[A]\ntype = Node\njust words\n", 3),
            ("[A]\n = 3\n", 2),
            ("[A]\ntype = Node\n\n[A]\n", 4),
            ("[A]\nx = 1\nx = 2\n", 3),
        ];
        for (src, line) in cases {
            let err = parse_document(src).unwrap_err();
            assert_eq!(err.line(), line, "{src:?} -> {err}");
        }

        assert!(matches!(
            parse_document("[A]\n\n[A]\n").unwrap_err(),
            ParseError::DuplicateSection { ref name, .. } if name == "A"
        ));
        assert!(matches!(
            parse_document("[A]\nk = 1\nk = 2\n").unwrap_err(),
            ParseError::DuplicateKey { ref key, .. } if key == "k"
        ));
    }

    #[test]
    fn test_document_round_trips_verbatim() {
        let sources = [
            SCENE.to_string(),
            SCENE.replace('\n', "\r\n"),
            "[A]\ntype = Node".to_string(),
            "\n\n; only comments\n".to_string(),
            "".to_string(),
            format!("{BOM}{SCENE}"),
            BOM.to_string(),
        ];
        for src in sources {
            let doc = parse_document(&src).unwrap();
            assert_eq!(write_document(&doc), src);
        }

        let doc = parse_document(&SCENE.replace('\n', "\r\n")).unwrap();
        assert_eq!(doc.line_ending, LineEnding::CrLf);
    }

    #[test]
    fn test_byte_order_mark_is_kept() {
        let reg = reg();
        let src = format!("{BOM}[A]\ntype = Node2D\n");
        let (doc, forest) = load(&reg, &src);
        assert!(doc.bom);
        assert_eq!(doc.section_names().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(forest.by_name("A").unwrap().type_name, "Node2D");
        assert!(!parse_document(SCENE).unwrap().bom);

        let mut session = EditSession::new();
        session.set(id(&forest, "A"), "Rotation", 2.0);
        assert_eq!(
            save(&reg, &doc, &forest, &session, "A"),
            format!("{BOM}[A]\ntype = Node2D\nRotation = 2\n")
        );

        // A mark anywhere else is still content
        assert!(parse_document("[A]\n\u{feff}x\n").is_err());
    }

    #[test]
    fn test_document_structure() {
        let doc = parse_document(SCENE).unwrap();
        assert_eq!(doc.preamble, vec!["; main menu".to_string()]);
        assert_eq!(
            doc.section_names().collect::<Vec<_>>(),
            vec!["Root", "Logo", "Backdrop"]
        );

        let root = doc.section("Root").unwrap();
        assert_eq!(root.get("Position"), Some("(10, 20)"));
        assert_eq!(
            root.entry("Position").unwrap().comment.as_deref(),
            Some("; centered later")
        );
        assert_eq!(root.trailer, vec![String::new()]);

        let logo = doc.section("Logo").unwrap();
        assert_eq!(
            logo.entry("Texture").unwrap().leading,
            vec!["; the studio logo".to_string()]
        );

        // `;` inside a value is not a comment
        let doc = parse_document("[A]\nText = a;b\n").unwrap();
        assert_eq!(doc.get_value("A", "Text"), Some("a;b"));
    }

    #[test]
    fn test_document_edits() {
        let mut doc = parse_document(SCENE).unwrap();

        // Comments above a removed key stay with the next one
        assert!(doc.remove_key("Logo", "Texture"));
        assert!(doc.set_value("Logo", "FlipV", "true"));
        assert!(!doc.set_value("Missing", "FlipV", "true"));

        let out = write_document(&doc);
        assert!(out.contains("parent = Root\n; the studio logo\nFlipH = true\nFlipV = true\n"));

        // ... or move to the trailer when the key was last
        let mut tail = parse_document("[A]\nx = 1\n\n; keep\ny = 2\n; after\n").unwrap();
        assert!(tail.remove_key("A", "y"));
        assert_eq!(write_document(&tail), "[A]\nx = 1\n\n; keep\n; after\n");

        let mut section = Section::new("Extra");
        section.set(TYPE_KEY, "Node");
        doc.push_section(section).unwrap();
        assert!(doc.push_section(Section::new("Extra")).is_err());
        assert!(write_document(&doc).ends_with("(0,0,0,200)\n\n[Extra]\ntype = Node\n"));
    }

    #[test]
    fn test_parse_records() {
        let doc = parse_document(SCENE).unwrap();
        let records = parse_records(&doc);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].name, "Root");
        assert_eq!(records[0].type_name, "Node2D");
        assert_eq!(records[0].parent, None);

        assert_eq!(records[1].parent.as_deref(), Some("Root"));
        assert_eq!(
            records[1].properties.keys().collect::<Vec<_>>(),
            vec!["Texture", "FlipH"]
        );
    }

    #[test]
    fn test_build_forest() {
        let reg = reg();
        let (_, forest) = load(&reg, SCENE);
        assert!(forest.warnings().is_empty(), "{:?}", forest.warnings());
        assert_eq!(forest.len(), 3);

        let root = id(&forest, "Root");
        assert_eq!(forest.roots(), vec![root]);
        assert_eq!(forest.children(root), &[id(&forest, "Logo"), id(&forest, "Backdrop")]);

        let logo = forest.by_name("Logo").unwrap();
        assert_eq!(logo.type_name, "Sprite");
        assert_eq!(
            path::get(&reg, logo.data(), "Texture"),
            Some(Variant::Resource(ResourceRef::new("Texture", "Res/logo.png")))
        );
        assert_eq!(path::get(&reg, logo.data(), "FlipH"), Some(Variant::Bool(true)));
        // Name mirrors the section
        assert_eq!(path::get(&reg, logo.data(), "Name"), Some(Variant::string("Logo")));

        let backdrop = forest.by_name("Backdrop").unwrap();
        assert_eq!(
            path::get(&reg, backdrop.data(), "Theme/FillColor"),
            Some(Variant::Color(Color::new(0, 0, 0, 200)))
        );

        let depths: Vec<usize> = forest.depth_first().into_iter().map(|(_, d)| d).collect();
        assert_eq!(depths, vec![0, 1, 1]);
    }

    #[test]
    fn test_build_skips_bad_records_and_keys() {
        let reg = reg();
        let src = "\
[Ghost]
type = Spaceship

[Untyped]
Position = (1,1)

[Theme]
type = BoxTheme

[Hero]
type = Sprite
Wings = 2
ProcessMode = Sideways
Rotation = fast
Name = Villain
ReadyForVisibility = true
Node2D/Position = (4,5)
";
        let (_, forest) = load(&reg, src);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.warnings().len(), 8, "{:?}", forest.warnings());
        let warned = |needle: &str| forest.warnings().iter().any(|w| w.contains(needle));
        assert!(warned("[Hero] key `Wings` skipped: `Sprite` has no property `Wings`"));
        assert!(warned("[Hero] key `Name` skipped: property is not persisted"));
        assert!(warned("[Hero] key `ReadyForVisibility` skipped: property is not persisted"));
        assert!(warned("[Hero] key `Rotation` skipped: "));

        let hero = forest.by_name("Hero").unwrap();
        assert_eq!(hero.name, "Hero");
        assert_eq!(path::get(&reg, hero.data(), "Name"), Some(Variant::string("Hero")));
        assert_eq!(
            path::get(&reg, hero.data(), "ReadyForVisibility"),
            Some(Variant::Bool(false))
        );
        // Grouping prefixes are accepted on load
        assert_eq!(
            path::get(&reg, hero.data(), "Position"),
            Some(Variant::Vector2(Vector2::new(4.0, 5.0)))
        );
    }

    #[test]
    fn test_unresolvable_parents_become_roots() {
        let reg = reg();
        let src = "\
[A]
type = Node
parent = Nowhere

[B]
type = Node
parent = C

[C]
type = Node
parent = B

[D]
type = Node
parent = D
";
        let (_, forest) = load(&reg, src);
        assert_eq!(forest.len(), 4);
        assert_eq!(forest.warnings().len(), 3, "{:?}", forest.warnings());

        let (a, b, c, d) = (
            id(&forest, "A"),
            id(&forest, "B"),
            id(&forest, "C"),
            id(&forest, "D"),
        );
        // B links under C first; C under B would close the loop
        assert_eq!(forest.parent(b), Some(c));
        assert_eq!(forest.parent(c), None);
        assert_eq!(forest.roots(), vec![a, c, d]);
    }

    #[test]
    fn test_forest_link_and_rename() {
        let reg = reg();
        let (_, mut forest) = load(&reg, SCENE);
        let (root, logo, backdrop) = (
            id(&forest, "Root"),
            id(&forest, "Logo"),
            id(&forest, "Backdrop"),
        );
        assert!(forest.get(NodeID::from_parts(0, 1)).is_none());
        assert!(forest.get(NodeID::from_parts(root.index(), 1)).is_none());

        assert_eq!(forest.link(root, logo), Err(LinkRefusal::Cycle));
        assert_eq!(forest.link(logo, logo), Err(LinkRefusal::SelfParent));
        forest.link(backdrop, logo).unwrap();
        assert_eq!(forest.children(root), &[logo]);
        assert_eq!(forest.children(logo), &[backdrop]);

        assert!(forest.rename(&reg, logo, "Backdrop").is_err());
        forest.rename(&reg, logo, "Brand").unwrap();
        assert_eq!(forest.id_of("Brand"), Some(logo));
        assert_eq!(forest.id_of("Logo"), None);
        let node = forest.get(logo).unwrap();
        assert_eq!(path::get(&reg, node.data(), "Name"), Some(Variant::string("Brand")));
    }

    #[test]
    fn test_save_without_edits_is_byte_identical() {
        let reg = reg();
        let scene = format!("{SCENE}\n[Play]\ntype = Button\nparent = Root\nText = Go\n\n[Btn]\ntype = Button\n");
        for src in [scene.clone(), scene.replace('\n', "\r\n")] {
            let (doc, forest) = load(&reg, &src);
            assert!(forest.warnings().is_empty(), "{:?}", forest.warnings());
            let mut session = EditSession::new();
            for name in ["Root", "Logo", "Backdrop", "Play", "Btn"] {
                session.values(&reg, forest.by_name(name).unwrap());
                assert_eq!(save(&reg, &doc, &forest, &session, name), src);
            }
        }
    }

    #[test]
    fn test_rename_rewrites_header_and_parents() {
        let reg = reg();
        let src = "[A]\ntype = Node2D\n\n[B]\ntype = Sprite\nparent = A\n";
        let (doc, forest) = load(&reg, src);

        let mut session = EditSession::new();
        session.set(id(&forest, "A"), NAME_PATH, "A2");
        assert_eq!(
            save(&reg, &doc, &forest, &session, "A"),
            "[A2]\ntype = Node2D\n\n[B]\ntype = Sprite\nparent = A2\n"
        );
    }

    #[test]
    fn test_rename_onto_existing_section_fails() {
        let reg = reg();
        let src = "[A]\ntype = Node\n\n[B]\ntype = Node\n";
        let (doc, forest) = load(&reg, src);

        let mut session = EditSession::new();
        let a = forest.by_name("A").unwrap();
        session.set(a.id, NAME_PATH, "B");
        let err = reconcile(&doc, &reg, a, session.edited(a.id).unwrap()).unwrap_err();
        assert!(matches!(err, SceneError::SectionExists(ref n) if n == "B"));
    }

    #[test]
    fn test_nested_edit_then_reset() {
        let reg = reg();
        let src = "[Box]\ntype = ColorRectangle\n";
        let (doc, forest) = load(&reg, src);
        let node = forest.by_name("Box").unwrap();

        let mut session = EditSession::new();
        session.set(node.id, "Theme/FillColor", Color::new(255, 0, 0, 255));
        let saved = save(&reg, &doc, &forest, &session, "Box");
        assert_eq!(saved, "[Box]\ntype = ColorRectangle\nTheme/FillColor = (255,0,0,255)\n");

        let doc = parse_document(&saved).unwrap();
        let reset = session.reset(&reg, node, "Theme/FillColor");
        assert_eq!(reset, Variant::Color(Color::TRANSPARENT));
        assert_eq!(save(&reg, &doc, &forest, &session, "Box"), src);
    }

    #[test]
    fn test_button_state_themes_round_trip() {
        let reg = reg();
        let src = "[Btn]\ntype = Button\n";
        let hover = "Themes/Hover/FillColor";
        let bare = Variant::Color(Color::rgb(64, 64, 64));
        let tinted = Variant::Color(Color::rgb(10, 20, 30));

        let (doc, forest) = load(&reg, src);
        let btn = forest.by_name("Btn").unwrap();
        assert_eq!(path::get(&reg, btn.data(), hover), Some(bare.clone()));

        // Setting the bare value compacts away and reloads as the same value
        let mut session = EditSession::new();
        session.set(btn.id, hover, bare.clone());
        let saved = save(&reg, &doc, &forest, &session, "Btn");
        assert_eq!(saved, src);
        let (_, reloaded) = load(&reg, &saved);
        let again = reloaded.by_name("Btn").unwrap();
        assert_eq!(path::get(&reg, again.data(), hover), Some(bare.clone()));

        // Any other value is written and survives a reload
        session.set(btn.id, hover, tinted.clone());
        let saved = save(&reg, &doc, &forest, &session, "Btn");
        assert_eq!(saved, "[Btn]\ntype = Button\nThemes/Hover/FillColor = (10,20,30,255)\n");
        let (_, reloaded) = load(&reg, &saved);
        let again = reloaded.by_name("Btn").unwrap();
        assert_eq!(path::get(&reg, again.data(), hover), Some(tinted));

        // A stored bare value keeps its line on an unedited save and reloads unchanged
        let stored = "[Btn]\ntype = Button\nThemes/Hover/FillColor = (64,64,64,255)\n";
        let (doc2, forest2) = load(&reg, stored);
        let mut seeded = EditSession::new();
        let btn2 = forest2.by_name("Btn").unwrap();
        seeded.values(&reg, btn2);
        let saved = save(&reg, &doc2, &forest2, &seeded, "Btn");
        let (_, reloaded) = load(&reg, &saved);
        let again = reloaded.by_name("Btn").unwrap();
        assert_eq!(path::get(&reg, again.data(), hover), Some(bare));
    }

    #[test]
    fn test_resource_paths() {
        let reg = reg();
        let src = "[Icon]\ntype = Sprite\n";
        let (doc, forest) = load(&reg, src);
        let icon = id(&forest, "Icon");

        let mut session = EditSession::new();
        session.set(icon, "Texture", "Res/Tex.png");
        let saved = save(&reg, &doc, &forest, &session, "Icon");
        assert_eq!(saved, "[Icon]\ntype = Sprite\nTexture = Texture(\"Res/Tex.png\")\n");

        let doc = parse_document(&saved).unwrap();
        session.set(icon, "Texture", "");
        assert_eq!(save(&reg, &doc, &forest, &session, "Icon"), src);
    }

    #[test]
    fn test_reserved_and_excluded_keys_are_not_written() {
        let reg = reg();
        let src = "[N]\ntype = Sprite\n";
        let (doc, forest) = load(&reg, src);
        let n = id(&forest, "N");

        let mut session = EditSession::new();
        session.set(n, TYPE_KEY, "Button");
        session.set(n, PARENT_KEY, "Elsewhere");
        session.set(n, "ReadyForVisibility", true);
        session.set(n, "NoSuchThing", 3);
        session.set(n, "Node2D/Rotation", 1.5);
        assert_eq!(
            save(&reg, &doc, &forest, &session, "N"),
            "[N]\ntype = Sprite\nRotation = 1.5\n"
        );
    }

    #[test]
    fn test_bad_value_aborts_reconcile() {
        let reg = reg();
        let (doc, forest) = load(&reg, "[N]\ntype = Sprite\n");
        let node = forest.by_name("N").unwrap();

        let mut session = EditSession::new();
        session.set(node.id, "FlipH", true);
        session.set(node.id, "Rotation", "sideways");
        let err = reconcile(&doc, &reg, node, session.edited(node.id).unwrap()).unwrap_err();
        assert!(matches!(err, SceneError::Value { ref path, .. } if path == "Rotation"));
    }

    #[test]
    fn test_missing_section_is_appended() {
        let reg = reg();
        let (_, forest) = load(&reg, "[Lost]\ntype = Label\n");
        let doc = parse_document("[Other]\ntype = Node\n").unwrap();
        let node = forest.by_name("Lost").unwrap();

        let mut session = EditSession::new();
        session.set(node.id, "Text", "hi");
        let out = write_document(&reconcile(&doc, &reg, node, session.edited(node.id).unwrap()).unwrap());
        assert_eq!(out, "[Other]\ntype = Node\n\n[Lost]\ntype = Label\nText = hi\n");
    }

    #[test]
    fn test_round_trip_is_idempotent() {
        let reg = reg();
        let src = "\
[Menu]
type = Node2D
Scale = (2,2)

[Play]
type = Button
parent = Menu
Text = Play
Themes/Normal/FontSize = 20

[Caption]
type = Label
parent = Menu
Text = Kennel
Visible = false
";
        let (mut doc, forest) = load(&reg, src);
        let mut session = EditSession::new();
        for (_, node) in forest.iter() {
            session.values(&reg, node);
            doc = reconcile(&doc, &reg, node, session.edited(node.id).unwrap()).unwrap();
        }
        let saved = write_document(&doc);

        let (_, reloaded) = load(&reg, &saved);
        assert!(reloaded.warnings().is_empty(), "{:?}", reloaded.warnings());
        assert_eq!(reloaded.len(), forest.len());
        for (_, node) in forest.iter() {
            let again = reloaded.by_name(&node.name).unwrap();
            assert_eq!(again.type_name, node.type_name);
            assert_eq!(
                path::walk_leaves(&reg, again.data()),
                path::walk_leaves(&reg, node.data())
            );
            let parent = |f: &Forest, id| f.parent(id).and_then(|p| f.get(p)).map(|p| p.name.clone());
            assert_eq!(parent(&reloaded, again.id), parent(&forest, node.id));
        }

        // A second save changes nothing
        let (doc2, forest2) = load(&reg, &saved);
        let mut session2 = EditSession::new();
        let mut again = doc2.clone();
        for (_, node) in forest2.iter() {
            session2.values(&reg, node);
            again = reconcile(&again, &reg, node, session2.edited(node.id).unwrap()).unwrap();
        }
        assert_eq!(write_document(&again), saved);
    }

    #[test]
    fn test_session_values_get_reset() {
        let reg = reg();
        let (_, forest) = load(&reg, SCENE);
        let logo = forest.by_name("Logo").unwrap();

        let mut session = EditSession::new();
        assert!(!session.is_editing(logo.id));
        let values = session.values(&reg, logo);
        assert_eq!(values.get(NAME_PATH), Some(&Variant::string("Logo")));
        assert_eq!(values.get("FlipH"), Some(&Variant::Bool(true)));
        assert!(values.contains_key("Position"));
        assert!(!values.contains_key("ReadyForVisibility"));
        assert!(session.is_editing(logo.id));

        session.set(logo.id, "FlipH", false);
        // Seeding again keeps edits
        assert_eq!(session.values(&reg, logo).get("FlipH"), Some(&Variant::Bool(false)));
        assert_eq!(session.get(&reg, logo, "FlipH"), Some(Variant::Bool(false)));
        assert_eq!(session.get(&reg, logo, "Nope"), None);

        assert_eq!(
            session.reset(&reg, logo, "Scale"),
            Variant::Vector2(Vector2::new(1.0, 1.0))
        );
        assert!(session.discard(logo.id).is_some());
        assert!(!session.is_editing(logo.id));
    }

    #[test]
    fn test_session_apply() {
        let reg = reg();
        let (_, mut forest) = load(&reg, SCENE);
        let logo = id(&forest, "Logo");

        let mut session = EditSession::new();
        session.set(logo, NAME_PATH, "Brand");
        session.set(logo, "Node2D/Rotation", 0.25);
        session.set(logo, "FlipV", true);
        session.apply(&reg, &mut forest, logo).unwrap();

        let node = forest.by_name("Brand").unwrap();
        assert_eq!(node.id, logo);
        assert_eq!(path::get(&reg, node.data(), "FlipV"), Some(Variant::Bool(true)));
        assert_eq!(
            path::get(&reg, node.data(), "Rotation"),
            Some(Variant::from(0.25f32))
        );

        session.set(logo, NAME_PATH, "Root");
        assert!(matches!(
            session.apply(&reg, &mut forest, logo),
            Err(SceneError::Node(_))
        ));
    }

    #[test]
    fn test_io_load_and_save() {
        let reg = reg();
        let dir = temp_test_dir();
        let file = dir.join("menu.scn");
        fs::write(&file, SCENE).unwrap();

        let forest = load_scene_with(&file, &reg).unwrap();
        assert_eq!(forest.len(), 3);

        let root = forest.by_name("Root").unwrap();
        let mut session = EditSession::new();
        session.values(&reg, root);
        session.set(root.id, "Position", Vector2::new(0.0, 0.0));
        session.set(root.id, "Layer", 3);
        save_node_with(&file, &reg, root, session.edited(root.id).unwrap()).unwrap();

        let text = fs::read_to_string(&file).unwrap();
        assert_eq!(text, SCENE.replace("Position = (10, 20)   ; centered later\n", "Layer = 3\n"));
        // No temporary files are left behind
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);

        let reloaded = load_scene_with(&file, &reg).unwrap();
        let root = reloaded.by_name("Root").unwrap();
        assert_eq!(path::get(&reg, root.data(), "Layer"), Some(Variant::from(3)));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_io_errors() {
        let reg = reg();
        let dir = temp_test_dir();
        let missing = dir.join("missing.scn");
        assert!(matches!(
            load_scene_with(&missing, &reg),
            Err(SceneError::FileNotFound(ref p)) if p == &missing
        ));

        let broken = dir.join("broken.scn");
        fs::write(&broken, "[A]\ntype = Node\n[A\n").unwrap();
        let err = load_scene_with(&broken, &reg).unwrap_err();
        assert!(matches!(err, SceneError::Parse(ParseError::MalformedHeader { line: 3 })));

        // A failed save leaves the file as it was
        let good = dir.join("good.scn");
        fs::write(&good, "[N]\ntype = Node2D\n").unwrap();
        let (_, forest) = load(&reg, "[N]\ntype = Node2D\n");
        let node = forest.by_name("N").unwrap();
        let mut session = EditSession::new();
        session.set(node.id, "Rotation", "not a number");
        assert!(save_node_with(&good, &reg, node, session.edited(node.id).unwrap()).is_err());
        assert_eq!(fs::read_to_string(&good).unwrap(), "[N]\ntype = Node2D\n");

        assert!(matches!(
            save_node_with(&missing, &reg, node, session.edited(node.id).unwrap()),
            Err(SceneError::FileNotFound(_))
        ));

        fs::remove_dir_all(&dir).unwrap();
    }
}
