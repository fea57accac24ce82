use approx::assert_relative_eq;
use aruco_solids::mesh::{binary_stl_len, encode_stl, StlFormat};
use aruco_solids::{
    build_marker, generate_markers, FileExporter, GenerateConfig, GenerateError, MarkerGenerator,
    MarkerGeometry, MarkerSpec, OutputFormat, BLACK_PART, WHITE_PART,
};
use aruco_solids::bitmap::BitmapError;
use std::fs;

fn spec(id: u32) -> MarkerSpec {
    MarkerSpec::new("DICT_4X4_50", id, MarkerGeometry::default())
}

fn binary(spec: &MarkerSpec) -> Vec<u8> {
    let assembly = build_marker(spec).expect("build");
    encode_stl(&assembly.stl_solids(), StlFormat::Binary).expect("encode")
}

#[test]
fn same_spec_gives_identical_stl() {
    let a = binary(&spec(7));
    let b = binary(&spec(7));
    assert_eq!(a, b);
    assert_ne!(a, binary(&spec(8)));
}

#[test]
fn every_part_has_positive_volume() {
    for id in [0, 13, 49] {
        let assembly = build_marker(&spec(id)).expect("build");
        for part in assembly.parts() {
            assert!(part.solid.volume() > 0.0, "id {id}: {} is empty", part.name);
        }
    }
}

#[test]
fn parts_do_not_overlap() {
    let assembly = build_marker(&spec(3)).expect("build");
    let white = assembly.part(WHITE_PART).expect("white");
    let black = assembly.part(BLACK_PART).expect("black");
    assert!(white.solid.intersection(&black.solid).volume().abs() < 1e-6);
}

#[test]
fn generated_files_have_binary_stl_length() {
    let dir = tempfile::tempdir().expect("tempdir");
    let generator = MarkerGenerator::new(
        "dict_4x4_50",
        MarkerGeometry::default(),
        FileExporter::new(dir.path()),
    )
    .expect("generator");

    let marker = generator.generate(5).expect("generate");
    let path = dir.path().join("marker_DICT_4X4_50_id=5.stl");
    assert_eq!(marker.paths, vec![path.clone()]);

    let len = fs::metadata(&path).expect("metadata").len() as usize;
    assert!(len > 0);
    assert_eq!(len, binary_stl_len(marker.triangles));
}

#[test]
fn config_run_writes_one_file_per_id() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = GenerateConfig {
        dictionary: "DICT_4X4_250".to_string(),
        ids: Some(vec![2, 249]),
        output_dir: dir.path().join("out"),
        format: OutputFormat::Ascii,
        split_parts: true,
        ..GenerateConfig::default()
    };
    let markers = generate_markers(&cfg).expect("generate");
    assert_eq!(markers.len(), 2);
    for marker in &markers {
        assert_eq!(marker.paths.len(), 3);
        for path in &marker.paths {
            let text = fs::read_to_string(path).expect("read");
            assert!(text.starts_with("solid "));
            let last = if path.to_string_lossy().ends_with("_white_bits.stl") {
                WHITE_PART
            } else {
                BLACK_PART
            };
            assert!(text.trim_end().ends_with(&format!("endsolid {last}")));
        }
    }
}

#[test]
fn margin_and_thickness_move_the_bounds() {
    let bounds = |geometry: MarkerGeometry| {
        build_marker(&MarkerSpec::new("DICT_4X4_50", 0, geometry))
            .expect("build")
            .bounds()
            .expect("bounds")
    };

    let base = MarkerGeometry::default();
    let wider = MarkerGeometry {
        margin: 3.0,
        ..base
    };
    let thicker = MarkerGeometry {
        total_thickness: 3.0,
        white_cell_thickness: 2.8,
        ..base
    };

    let b0 = bounds(base);
    let b1 = bounds(wider);
    let b2 = bounds(thicker);
    assert_relative_eq!(b0.extent().x, 23.0, epsilon = 1e-9);
    assert_relative_eq!(b1.extent().x, 26.0, epsilon = 1e-9);
    assert!(b1.extent().y > b0.extent().y);
    assert_relative_eq!(b0.max.z, 2.0, epsilon = 1e-9);
    assert_relative_eq!(b2.max.z, 3.0, epsilon = 1e-9);
}

#[test]
fn plate_depth_and_rim_follow_the_geometry() {
    let white_bounds = |geometry: MarkerGeometry| {
        build_marker(&MarkerSpec::new("DICT_4X4_50", 0, geometry))
            .expect("build")
            .part(WHITE_PART)
            .expect("white part")
            .solid
            .bounds()
            .expect("bounds")
    };

    let base = MarkerGeometry::default();
    let deeper = MarkerGeometry {
        white_cell_thickness: 1.9,
        ..base
    };
    let wider = MarkerGeometry {
        margin: 2.5,
        ..base
    };

    let b0 = white_bounds(base);
    let b1 = white_bounds(deeper);
    let b2 = white_bounds(wider);
    assert_relative_eq!(b0.max.z, 1.8, epsilon = 1e-9);
    assert_relative_eq!(b1.max.z, 1.9, epsilon = 1e-9);
    assert!(b1.max.z > b0.max.z);
    assert_relative_eq!(b0.min.z, 0.0, epsilon = 1e-9);

    assert_relative_eq!(b0.extent().x, 23.0, epsilon = 1e-9);
    assert_relative_eq!(b2.extent().x, 25.0, epsilon = 1e-9);
    assert!(b2.extent().y > b0.extent().y);
}

#[test]
fn out_of_range_id_is_rejected() {
    let err = build_marker(&spec(50)).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Bitmap(BitmapError::MarkerIdOutOfRange { id: 50, .. })
    ));

    let err = build_marker(&MarkerSpec::new("DICT_9X9_1", 0, MarkerGeometry::default()))
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Bitmap(BitmapError::UnknownDictionary(_))
    ));
}
