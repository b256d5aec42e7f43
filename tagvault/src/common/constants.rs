/// File name of the plaintext directory descriptor list.
pub const DESCRIPTOR_FILE: &str = "file_manager.dbase";

/// File name of the enciphered configuration object.
pub const CONFIG_FILE: &str = "file_manager.dbconfig";

/// Subdirectory of the store root holding directory-level records.
pub const DIR_RECORDS_SUBDIR: &str = "dir_mdata";

/// Extension shared by every record file and by the per-directory record folder.
pub const RECORD_EXTENSION: &str = "mdata";

/// Suffix appended to artifacts that could not be decoded, so they survive the next save.
pub const UNDECODABLE_EXTENSION: &str = "undecodable";

/// Folder name used for the record folder of a directory that has no final component (e.g. `/`).
pub const ROOT_FOLDER_NAME: &str = "root";

/// Number of symbols in every derived keystream.
pub const KEYSTREAM_LEN: usize = 1024;

/// Printable alphabet keystream symbols are drawn from.
pub const KEYSTREAM_CHARSET: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./:;<=>?@[]^_`{|}~ ";
