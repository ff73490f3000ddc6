use menu_distort::{Gallery, LinkId, MenuError};

#[test]
fn first_link_is_active_initially() {
    let gallery = Gallery::new(4, vec!["one", "two", "three", "four"]).unwrap();
    assert_eq!(gallery.active_link(), LinkId(0));
    assert_eq!(*gallery.active(), "one");
    assert_eq!(gallery.len(), 4);
}

#[test]
fn select_each_link() {
    let mut gallery = Gallery::new(4, vec![10, 11, 12, 13]).unwrap();
    for i in 0..4 {
        assert_eq!(*gallery.select(LinkId(i)).unwrap(), 10 + i);
        assert_eq!(*gallery.active(), 10 + i);
    }
}

#[test]
fn selection_sticks_until_another_link() {
    let mut gallery = Gallery::new(3, vec!['a', 'b', 'c']).unwrap();
    gallery.select(LinkId(2)).unwrap();
    let err = gallery.select(LinkId(7)).unwrap_err();
    assert_eq!(err, MenuError::UnknownLink { index: 7, len: 3 });
    assert_eq!(gallery.active_link(), LinkId(2));
}

#[test]
fn count_mismatch_fails_fast() {
    let err = Gallery::new(5, vec!["a", "b", "c", "d"]).unwrap_err();
    assert_eq!(err, MenuError::LinkCountMismatch { links: 5, textures: 4 });
    assert_eq!(Gallery::<u8>::new(0, vec![]).unwrap_err(), MenuError::EmptyGallery);
}

#[test]
fn try_map_keeps_selection() {
    let mut gallery = Gallery::new(2, vec!["x.jpg", "y.jpg"]).unwrap();
    gallery.select(LinkId(1)).unwrap();
    let lengths = gallery.try_map(|url| Ok(url.len())).unwrap();
    assert_eq!(lengths.active_link(), LinkId(1));
    assert_eq!(lengths.iter().copied().collect::<Vec<_>>(), vec![5, 5]);

    let failed = Gallery::new(1, vec!["z"])
        .unwrap()
        .try_map(|_| Err::<(), _>(MenuError::Context));
    assert_eq!(failed.unwrap_err(), MenuError::Context);
}
