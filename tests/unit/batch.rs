use super::*;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kksubs-batch-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn lists_only_images_sorted_by_name() {
    let dir = temp_dir("list");
    for name in ["b.PNG", "a.jpg", "c.txt", "d.webp"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }
    std::fs::create_dir_all(dir.join("nested.png")).unwrap();

    let names: Vec<String> = list_images(&dir)
        .unwrap()
        .iter()
        .map(|p| file_name(p))
        .collect();
    assert_eq!(names, vec!["a.jpg", "b.PNG", "d.webp"]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_input_dir_is_a_configuration_error() {
    let err = list_images(Path::new("/no/such/input/dir")).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn save_image_drops_alpha_for_jpeg() {
    let dir = temp_dir("save");
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 10, 10, 255]));
    save_image(img.clone(), &dir.join("out.jpg")).unwrap();
    save_image(img, &dir.join("out.png")).unwrap();

    let png = image::open(dir.join("out.png")).unwrap().into_rgba8();
    assert_eq!(png.get_pixel(1, 1).0, [200, 10, 10, 255]);
    assert!(image::open(dir.join("out.jpg")).is_ok());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).unwrap_err().is_configuration());
    assert!(build_thread_pool(Some(2)).is_ok());
}

#[test]
fn empty_job_reports_nothing() {
    let dir = temp_dir("empty");
    let report = BatchJob::new(&dir, dir.join("out")).run().unwrap();
    assert_eq!(report, BatchReport::default());
    assert!(report.is_success());
    let _ = std::fs::remove_dir_all(&dir);
}
