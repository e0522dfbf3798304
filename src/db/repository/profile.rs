use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::parse_uuid;
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub fn insert_profile(conn: &Connection, input: &NewProfile) -> Result<Profile, DatabaseError> {
    let now = Utc::now();
    let profile = Profile {
        id: Uuid::new_v4(),
        email: input.email.clone(),
        full_name: input.full_name.clone(),
        role: input.role,
        specialty: input.specialty,
        license_number: input.license_number.clone(),
        phone: input.phone.clone(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    conn.execute(
        "INSERT INTO profiles (id, email, full_name, role, specialty, license_number, phone,
         is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            profile.id.to_string(),
            profile.email,
            profile.full_name,
            profile.role.as_str(),
            profile.specialty.map(|s| s.as_str()),
            profile.license_number,
            profile.phone,
            profile.is_active as i32,
            profile.created_at,
            profile.updated_at,
        ],
    )?;
    Ok(profile)
}

pub fn get_profile(conn: &Connection, id: &Uuid) -> Result<Option<Profile>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, email, full_name, role, specialty, license_number, phone,
         is_active, created_at, updated_at
         FROM profiles WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.to_string()], |row| {
        Ok(ProfileRow {
            id: row.get(0)?,
            email: row.get(1)?,
            full_name: row.get(2)?,
            role: row.get(3)?,
            specialty: row.get(4)?,
            license_number: row.get(5)?,
            phone: row.get(6)?,
            is_active: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    });

    match result {
        Ok(row) => Ok(Some(profile_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

struct ProfileRow {
    id: String,
    email: String,
    full_name: String,
    role: String,
    specialty: Option<String>,
    license_number: Option<String>,
    phone: Option<String>,
    is_active: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn profile_from_row(row: ProfileRow) -> Result<Profile, DatabaseError> {
    Ok(Profile {
        id: parse_uuid(&row.id)?,
        email: row.email,
        full_name: row.full_name,
        role: UserRole::from_str(&row.role)?,
        specialty: row.specialty.as_deref().map(Specialty::from_str).transpose()?,
        license_number: row.license_number,
        phone: row.phone,
        is_active: row.is_active != 0,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
