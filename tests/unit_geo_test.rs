use typedcmds::{Builder, CommandFlags, key_slot};

#[test]
fn test_geosearch_radius_cached() {
    let cmd = Builder::new()
        .geosearch()
        .key("Sicily")
        .fromlonlat(15.0, 37.0)
        .byradius(200.0)
        .km()
        .asc()
        .count(10)
        .any()
        .withdist()
        .cache();
    assert_eq!(
        cmd.commands(),
        [
            "GEOSEARCH", "Sicily", "FROMLONLAT", "15", "37", "BYRADIUS", "200", "KM", "ASC",
            "COUNT", "10", "ANY", "WITHDIST",
        ]
    );
    assert_eq!(
        cmd.flags(),
        CommandFlags::READ_ONLY | CommandFlags::CACHE_ELIGIBLE
    );
    assert_eq!(cmd.slot().get(), Some(key_slot(b"Sicily")));

    let (key, command) = cmd.cache_key();
    assert_eq!(key, "Sicily");
    assert_eq!(command, "GEOSEARCHFROMLONLAT1537BYRADIUS200KMASCCOUNT10ANYWITHDIST");
}

#[test]
fn test_geosearch_box_from_member() {
    let cmd = Builder::new()
        .geosearch()
        .key("Sicily")
        .frommember("Palermo")
        .bybox(400.0)
        .height(250.5)
        .mi()
        .withcoord()
        .withhash()
        .build();
    assert_eq!(
        cmd.commands(),
        [
            "GEOSEARCH", "Sicily", "FROMMEMBER", "Palermo", "BYBOX", "400", "250.5", "MI",
            "WITHCOORD", "WITHHASH",
        ]
    );
    assert!(!cmd.is_cache_eligible());
}

#[test]
fn test_geosearch_polygon_repeats_vertices() {
    let cmd = Builder::new()
        .geosearch()
        .key("area")
        .fromlonlat(0.0, 0.0)
        .bypolygon(3)
        .vertices(1.0, 1.0)
        .vertices(2.0, 2.0)
        .vertices(3.0, 1.0)
        .build();
    assert_eq!(
        cmd.commands(),
        [
            "GEOSEARCH", "area", "FROMLONLAT", "0", "0", "BYPOLYGON", "3", "1", "1", "2", "2",
            "3", "1",
        ]
    );
}

#[test]
fn test_geoadd_repeated_members() {
    let cmd = Builder::new()
        .geoadd()
        .key("Sicily")
        .nx()
        .ch()
        .longitude_latitude_member(13.361389, 38.115556, "Palermo")
        .longitude_latitude_member(15.087269, 37.502669, "Catania")
        .build();
    assert_eq!(
        cmd.commands(),
        [
            "GEOADD", "Sicily", "NX", "CH", "13.361389", "38.115556", "Palermo", "15.087269",
            "37.502669", "Catania",
        ]
    );
    assert!(cmd.flags().is_empty());
}

#[test]
fn test_georadius_store_is_a_write() {
    let cmd = Builder::new()
        .georadius()
        .key("{Sicily}")
        .longitude(15.0)
        .latitude(37.0)
        .radius(200.0)
        .km()
        .count(5)
        .desc()
        .store("{Sicily}:near")
        .build();
    assert_eq!(
        cmd.commands(),
        [
            "GEORADIUS", "{Sicily}", "15", "37", "200", "KM", "COUNT", "5", "DESC", "STORE",
            "{Sicily}:near",
        ]
    );
    assert!(!cmd.is_read_only());
    assert_eq!(cmd.slot().get(), Some(key_slot(b"Sicily")));
}

#[test]
fn test_georadius_ro_cached() {
    let cmd = Builder::new()
        .georadiusbymember_ro()
        .key("Sicily")
        .member("Agrigento")
        .radius(100.0)
        .km()
        .withdist()
        .cache();
    assert_eq!(
        cmd.commands(),
        ["GEORADIUSBYMEMBER_RO", "Sicily", "Agrigento", "100", "KM", "WITHDIST"]
    );
    assert!(cmd.is_cache_eligible());
}

#[test]
fn test_geodist_and_geopos() {
    let cmd = Builder::new()
        .geodist()
        .key("Sicily")
        .member1("Palermo")
        .member2("Catania")
        .km()
        .cache();
    assert_eq!(
        cmd.commands(),
        ["GEODIST", "Sicily", "Palermo", "Catania", "KM"]
    );

    let cmd = Builder::new().geopos().key("Sicily").cache();
    assert_eq!(cmd.commands(), ["GEOPOS", "Sicily"]);

    let cmd = Builder::new()
        .geohash()
        .key("Sicily")
        .member(["Palermo", "Catania"])
        .cache();
    assert_eq!(cmd.commands(), ["GEOHASH", "Sicily", "Palermo", "Catania"]);
}

#[test]
fn test_geosearchstore_tracks_both_keys() {
    let cmd = Builder::new()
        .geosearchstore()
        .destination("{geo}dst")
        .source("{geo}src")
        .frommember("home")
        .byradius(1.5)
        .m()
        .storedist()
        .build();
    assert_eq!(
        cmd.commands(),
        [
            "GEOSEARCHSTORE", "{geo}dst", "{geo}src", "FROMMEMBER", "home", "BYRADIUS", "1.5",
            "M", "STOREDIST",
        ]
    );
    assert_eq!(cmd.slot().get(), Some(key_slot(b"geo")));

    let cmd = Builder::new()
        .geosearchstore()
        .destination("a")
        .source("b")
        .frommember("home")
        .byradius(1.0)
        .m()
        .build();
    assert!(cmd.slot().is_cross());
}
