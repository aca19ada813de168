//! Pack Tests
//!
//! Opening, building and overwriting mod folders on disk.

use std::fs;
use std::path::{Path, PathBuf};

use mef_builder::config::BuilderConfig;
use mef_builder::export::export_def;
use mef_builder::model::{Cue, ModPack, ProjectDef, Track, TrackUse};
use mef_builder::pack::{build_pack, open_pack, overwrite_pack, PackLayout};
use mef_builder::MefError;
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

/// Music folder with two tracks and an icon image.
fn music_folder() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Siege.ogg"), b"siege").unwrap();
    fs::write(dir.path().join("Opening.ogg"), b"opening").unwrap();
    fs::write(dir.path().join("icon.png"), b"png").unwrap();
    dir
}

fn halo_pack(music: &Path) -> ModPack {
    let mut meta = BuilderConfig::default().pack_meta("Halo", Some("musicexpanded.halo"));
    meta.mod_icon = Some(music.join("icon.png"));

    let mut pack = ModPack::new(meta);
    let def = pack.add_def("Halo").unwrap();
    def.add_tracks_from_folder(music).unwrap();
    pack
}

fn write_def_documents(dir: &Path, def: &ProjectDef) {
    fs::create_dir_all(dir).unwrap();
    let docs = export_def(def);
    fs::write(dir.join("tracks.xml"), docs.tracks_xml).unwrap();
    fs::write(dir.join("theme.xml"), docs.theme_xml).unwrap();
}

/// Bare mod folder with About/ and Defs/.
fn empty_mod() -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("About")).unwrap();
    fs::create_dir_all(dir.path().join("Defs")).unwrap();
    dir
}

fn halo_def() -> ProjectDef {
    let mut def = ProjectDef::new("Halo");
    def.tracks.push(Track::new(1, "Opening.ogg", "Opening", "Opening"));
    def
}

// === Build ===

#[test]
fn test_build_writes_full_layout() {
    let music = music_folder();
    let out = tempdir().unwrap();
    let pack = halo_pack(music.path());

    let report = build_pack(&pack, out.path(), None, false).unwrap();
    let mod_dir = out.path().join("Music Expanded_ Halo");
    assert_eq!(report.mod_dir, mod_dir);
    assert_eq!(report.defs_written, 1);
    assert_eq!(report.files_copied, 4);
    assert!(report.warnings.is_empty());

    for file in [
        "About/About.xml",
        "About/modicon.png",
        "Defs/Halo/tracks.xml",
        "Defs/Halo/theme.xml",
        "Sounds/MusicExpanded/Halo/001. Opening.ogg",
        "Sounds/MusicExpanded/Halo/002. Siege.ogg",
        "Textures/UI/Icons/Halo.png",
    ] {
        assert!(mod_dir.join(file).is_file(), "missing {}", file);
    }
    assert!(!mod_dir.join("About/Preview.png").exists());

    let copied = fs::read(mod_dir.join("Sounds/MusicExpanded/Halo/002. Siege.ogg")).unwrap();
    assert_eq!(copied, b"siege");

    let about = fs::read_to_string(mod_dir.join("About/About.xml")).unwrap();
    assert!(about.contains("\t<packageId>musicexpanded.halo</packageId>\n"));
    assert!(about.contains("<packageId>zal.mef</packageId>"));
}

#[test]
fn test_build_refuses_existing_destination() {
    let music = music_folder();
    let out = tempdir().unwrap();
    let pack = halo_pack(music.path());

    build_pack(&pack, out.path(), Some("Halo"), false).unwrap();
    let err = build_pack(&pack, out.path(), Some("Halo"), false).unwrap_err();
    assert!(matches!(err, MefError::DestinationExists { .. }));

    fs::write(out.path().join("Halo").join("stale.txt"), b"old").unwrap();
    build_pack(&pack, out.path(), Some("Halo"), true).unwrap();
    assert!(!out.path().join("Halo").join("stale.txt").exists());
}

#[test]
fn test_missing_audio_is_a_warning() {
    let music = music_folder();
    let out = tempdir().unwrap();
    let mut pack = halo_pack(music.path());
    pack.defs[0]
        .tracks
        .push(Track::new(3, music.path().join("Gone.ogg"), "Gone", "Gone"));

    let report = build_pack(&pack, out.path(), None, false).unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].source, music.path().join("Gone.ogg"));
    assert_eq!(report.files_copied, 4);
    assert!(report.mod_dir.join("Defs/Halo/theme.xml").is_file());
}

#[test]
fn test_naming_conflict_aborts_before_writing() {
    let music = music_folder();
    let out = tempdir().unwrap();
    let mut pack = halo_pack(music.path());
    let clash = pack.add_def("Halo!").unwrap();
    clash.tracks.push(Track::new(1, music.path().join("Siege.ogg"), "Siege", "Siege"));

    let err = build_pack(&pack, out.path(), None, false).unwrap_err();
    assert!(matches!(err, MefError::NamingConflict { ref folder } if folder == "Halo"));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_validation_aborts_before_writing() {
    let music = music_folder();
    let out = tempdir().unwrap();

    let mut pack = halo_pack(music.path());
    pack.add_def("Doom").unwrap();
    let err = build_pack(&pack, out.path(), None, false).unwrap_err();
    assert!(matches!(err, MefError::EmptyDef { ref label } if label == "Doom"));
    assert!(err.is_validation());

    let mut pack = halo_pack(music.path());
    pack.meta.supported_versions.clear();
    let err = build_pack(&pack, out.path(), None, false).unwrap_err();
    assert!(matches!(err, MefError::NoSupportedVersions));

    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn test_force_never_replaces_the_mod_being_built() {
    let music = music_folder();
    let out = tempdir().unwrap();
    let report = build_pack(&halo_pack(music.path()), out.path(), Some("HaloMod"), false).unwrap();
    let audio = report.mod_dir.join("Sounds/MusicExpanded/Halo/001. Opening.ogg");

    let opened = open_pack(&report.mod_dir).unwrap();
    let err = build_pack(&opened, out.path(), Some("HaloMod"), true).unwrap_err();
    assert!(matches!(err, MefError::DestinationHoldsSources { .. }));
    assert!(err.is_validation());
    assert_eq!(fs::read(&audio).unwrap(), b"opening");
    assert!(report.mod_dir.join("About/About.xml").is_file());

    // A sibling destination is still fine.
    build_pack(&opened, out.path(), Some("HaloCopy"), true).unwrap();
}

// === Open ===

#[test]
fn test_open_built_mod() {
    let music = music_folder();
    let out = tempdir().unwrap();
    let pack = halo_pack(music.path());
    let report = build_pack(&pack, out.path(), None, false).unwrap();

    let opened = open_pack(&report.mod_dir).unwrap();
    let layout = PackLayout::new(&report.mod_dir);
    assert_eq!(opened.meta.name, "Music Expanded: Halo");
    assert_eq!(opened.meta.package_id, "musicexpanded.halo");
    assert_eq!(opened.meta.supported_versions, ["1.6", "2.0"]);
    assert_eq!(opened.meta.mod_icon, Some(layout.about_dir().join("modicon.png")));
    assert_eq!(opened.root.as_deref(), Some(report.mod_dir.as_path()));

    let def = &opened.defs[0];
    assert_eq!(def.source_dir, Some(layout.def_dir("Halo")));
    assert_eq!(def.icon_source, Some(layout.icons_dir().join("Halo.png")));
    let sources: Vec<PathBuf> = def.tracks.iter().map(|t| t.source_path.clone()).collect();
    assert_eq!(
        sources,
        [
            layout.content_dir("Halo").join("001. Opening.ogg"),
            layout.content_dir("Halo").join("002. Siege.ogg"),
        ]
    );

    // Rebuilding the opened mod finds every asset.
    let again = tempdir().unwrap();
    let rebuilt = build_pack(&opened, again.path(), None, false).unwrap();
    assert!(rebuilt.warnings.is_empty());
    assert_eq!(rebuilt.files_copied, 4);
}

#[test]
fn test_open_skips_patches_and_broken_defs() {
    let root = empty_mod();
    let defs = root.path().join("Defs");
    write_def_documents(&defs.join("Halo"), &halo_def());
    write_def_documents(&defs.join("patches"), &ProjectDef::new("Not A Def"));
    fs::create_dir_all(defs.join("Broken")).unwrap();
    fs::write(defs.join("Broken").join("theme.xml"), "<Defs><MusicExpanded.ThemeDef>").unwrap();
    fs::write(defs.join("Broken").join("tracks.xml"), "<Defs/>").unwrap();
    fs::create_dir_all(defs.join("Empty")).unwrap();

    let pack = open_pack(root.path()).unwrap();
    let names: Vec<&str> = pack.defs.iter().map(|d| d.label_game.as_str()).collect();
    assert_eq!(names, ["Halo"]);
    assert_eq!(pack.meta.name, "");
}

#[test]
fn test_open_scans_defs_in_name_order() {
    let root = empty_mod();
    let defs = root.path().join("Defs");
    let mut doom = ProjectDef::new("Doom");
    doom.tracks.push(Track::new(1, "e1m1.ogg", "E1M1", "E1M1"));
    write_def_documents(&defs.join("Zeta"), &halo_def());
    write_def_documents(&defs.join("Alpha"), &doom);

    let pack = open_pack(root.path()).unwrap();
    let names: Vec<&str> = pack.defs.iter().map(|d| d.label_game.as_str()).collect();
    assert_eq!(names, ["Doom", "Halo"]);
}

#[test]
fn test_open_requires_mod_folders() {
    let dir = tempdir().unwrap();
    let err = open_pack(dir.path()).unwrap_err();
    assert!(matches!(err, MefError::NotAModFolder { missing: "About", .. }));
}

#[test]
fn test_open_without_valid_defs() {
    let root = empty_mod();
    fs::create_dir_all(root.path().join("Defs").join("Patches")).unwrap();
    let err = open_pack(root.path()).unwrap_err();
    assert!(matches!(err, MefError::NoValidDefs { .. }));
}

// === Overwrite ===

#[test]
fn test_overwrite_only_touches_documents() {
    let music = music_folder();
    let out = tempdir().unwrap();
    let report = build_pack(&halo_pack(music.path()), out.path(), None, false).unwrap();
    let about_path = report.mod_dir.join("About/About.xml");
    let about_before = fs::read_to_string(&about_path).unwrap();

    let mut pack = open_pack(&report.mod_dir).unwrap();
    pack.def_mut("halo")
        .unwrap()
        .track_mut(2)
        .unwrap()
        .apply_use(TrackUse::new(Cue::BattleMedium, ["Desert"]), true)
        .unwrap();
    let written = overwrite_pack(&pack).unwrap();
    assert_eq!(written, [report.mod_dir.join("Defs").join("Halo")]);

    let reopened = open_pack(&report.mod_dir).unwrap();
    assert_eq!(reopened.defs[0].tracks[1].uses_summary(), "BattleMedium");
    assert_eq!(reopened.defs[0].tracks[1].uses()[0].allowed_biomes(), ["Desert"]);
    assert_eq!(fs::read_to_string(&about_path).unwrap(), about_before);
    assert_eq!(
        fs::read(report.mod_dir.join("Sounds/MusicExpanded/Halo/002. Siege.ogg")).unwrap(),
        b"siege"
    );
}

#[test]
fn test_overwrite_unedited_mod_is_byte_identical() {
    let music = music_folder();
    let out = tempdir().unwrap();
    let report = build_pack(&halo_pack(music.path()), out.path(), None, false).unwrap();
    let tracks_path = report.mod_dir.join("Defs/Halo/tracks.xml");
    let theme_path = report.mod_dir.join("Defs/Halo/theme.xml");
    let tracks_before = fs::read_to_string(&tracks_path).unwrap();
    let theme_before = fs::read_to_string(&theme_path).unwrap();

    overwrite_pack(&open_pack(&report.mod_dir).unwrap()).unwrap();
    assert_eq!(fs::read_to_string(&tracks_path).unwrap(), tracks_before);
    assert_eq!(fs::read_to_string(&theme_path).unwrap(), theme_before);
}
