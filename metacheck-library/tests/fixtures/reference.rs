/// Reference data for the data-driven cases
///
/// Mirrors a device's sample corpus: three MP3 tagging variants plus one
/// WMA and one WMV file whose support depends on optional codecs.

pub const MEDIA_ROOT: &str = "/sdcard/media_api/metaDataTestMedias";

pub const REFERENCE_TOML: &str = r#"
[[mp3]]
sample = "ID3V1V2"
file_path = "MP3/ID3V1_ID3V2.mp3"
cd_track = "1/10"
album = "test ID3V2 Album"
artist = "test ID3V2 Artist"
author = "test ID3V2 Author"
composer = "test ID3V2 Composer"
date = "20080101T000000.000Z"
genre = "Blues"
title = "test ID3V2 Title"
year = "2008"
duration = 245000
num_tracks = 1
writer = "test ID3V2 Writer"

[[mp3]]
sample = "ID3V2"
file_path = "MP3/ID3V2.mp3"
cd_track = "2/10"
album = "test ID3V2 Album"
artist = "test ID3V2 Artist"
composer = "test ID3V2 Composer"
genre = "Jazz"
title = "test ID3V2 Title"
year = "2008"
duration = 245000
num_tracks = 1

[[mp3]]
sample = "ID3V1"
file_path = "MP3/ID3V1.mp3"
cd_track = "1"
album = "test ID3V1 Album"
artist = "test ID3V1 Artist"
genre = "Blues"
title = "test ID3V1 Title"
year = "2008"
duration = 245000
num_tracks = 1

[[wma]]
file_path = "WMA/WMA10.wma"
album = "WMA10 Album"
artist = "WMA10 Artist"
title = "WMA10 Title"
duration = 183000
num_tracks = 1

[[wmv]]
file_path = "WMV/bugs.wmv"
title = "Bugs"
duration = 10000
num_tracks = 2
"#;
