//! User and group lookups.
//!
//! Names go through the system account database (`getpwnam_r` /
//! `getgrnam_r`). All-digit names are taken as numeric ids.

use crate::error::{RackError, Result};

/// Resolve a user name or numeric uid.
#[cfg(unix)]
pub fn resolve_uid(name: &str) -> Result<u32> {
    if let Ok(uid) = name.parse::<u32>() {
        return Ok(uid);
    }

    let cname = c_name("user", name)?;
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        // SAFETY: passwd is plain old data; getpwnam_r fills it and points
        // its string fields into `buf`, which outlives every read below.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut found: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwnam_r(
                cname.as_ptr(),
                &mut pwd,
                buf.as_mut_ptr(),
                buf.len(),
                &mut found,
            )
        };

        match rc {
            0 if found.is_null() => return Err(unknown("user", name)),
            0 => return Ok(pwd.pw_uid),
            libc::ERANGE => buf.resize(buf.len() * 2, 0),
            _ => return Err(RackError::Io(std::io::Error::from_raw_os_error(rc))),
        }
    }
}

/// Resolve a group name or numeric gid.
#[cfg(unix)]
pub fn resolve_gid(name: &str) -> Result<u32> {
    if let Ok(gid) = name.parse::<u32>() {
        return Ok(gid);
    }

    let cname = c_name("group", name)?;
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        // SAFETY: as in resolve_uid, for struct group.
        let mut grp: libc::group = unsafe { std::mem::zeroed() };
        let mut found: *mut libc::group = std::ptr::null_mut();
        let rc = unsafe {
            libc::getgrnam_r(
                cname.as_ptr(),
                &mut grp,
                buf.as_mut_ptr(),
                buf.len(),
                &mut found,
            )
        };

        match rc {
            0 if found.is_null() => return Err(unknown("group", name)),
            0 => return Ok(grp.gr_gid),
            libc::ERANGE => buf.resize(buf.len() * 2, 0),
            _ => return Err(RackError::Io(std::io::Error::from_raw_os_error(rc))),
        }
    }
}

#[cfg(unix)]
fn c_name(kind: &'static str, name: &str) -> Result<std::ffi::CString> {
    std::ffi::CString::new(name).map_err(|_| unknown(kind, name))
}

fn unknown(kind: &'static str, name: &str) -> RackError {
    RackError::UnknownAccount {
        kind,
        name: name.to_string(),
    }
}
